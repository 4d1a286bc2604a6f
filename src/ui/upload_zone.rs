/// Drop zone / file picker for the room photo
///
/// Validation errors stay here: they are shown under the zone and never
/// reach the session, and the zone stays interactive.

use iced::widget::{button, column, container, mouse_area, text, Column};
use iced::{Alignment, Border, Element, Length, Theme};
use std::path::PathBuf;

use super::theme;
use crate::upload::ValidationError;
use crate::Message;

#[derive(Debug, Default)]
pub struct UploadZone {
    /// A file is being dragged over the window
    drag_active: bool,
    /// A drop from the current gesture was already taken
    drop_taken: bool,
    /// A picked or dropped file is being read and validated
    busy: bool,
    error: Option<ValidationError>,
}

impl UploadZone {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The quiz may not open while a photo is being read
    pub fn quiz_available(&self) -> bool {
        !self.busy
    }

    /// A new drag gesture entered the window
    pub fn hovered(&mut self) {
        if !self.drag_active {
            self.drag_active = true;
            self.drop_taken = false;
        }
    }

    pub fn hover_left(&mut self) {
        self.drag_active = false;
    }

    /// Take the first file of a drop gesture; later files are ignored
    pub fn accept_drop(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.drag_active = false;
        if self.drop_taken || self.busy {
            log::debug!("Ignoring extra dropped file {}", path.display());
            return None;
        }
        self.drop_taken = true;
        self.busy = true;
        Some(path)
    }

    /// A file came from the picker
    pub fn accept_pick(&mut self, path: PathBuf) -> Option<PathBuf> {
        if self.busy {
            return None;
        }
        self.busy = true;
        Some(path)
    }

    pub fn rejected(&mut self, error: ValidationError) {
        log::warn!("⚠️  Rejected upload: {:?}", error);
        self.busy = false;
        self.error = Some(error);
    }

    pub fn accepted(&mut self) {
        self.busy = false;
        self.error = None;
    }

    /// Clear transient drag state when the zone is shown again
    pub fn reset(&mut self) {
        self.drag_active = false;
        self.drop_taken = false;
        self.busy = false;
        self.error = None;
    }

    pub fn view(&self) -> Element<'_, Message> {
        let border_color = if self.drag_active {
            theme::cyan()
        } else {
            theme::accent(2).border
        };

        let prompt: Column<Message> = column![
            text("⬆").size(48).color(theme::pink()),
            text("Drop your room photo here").size(20),
            text(if self.busy { "Reading photo…" } else { "or click to browse" })
                .size(14)
                .color(theme::cyan()),
            text("JPEG, PNG, or WebP · up to 10 MB")
                .size(12)
                .color(theme::muted()),
        ]
        .spacing(10)
        .align_x(Alignment::Center);

        let zone = container(prompt)
            .padding(48)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                border: Border {
                    color: border_color,
                    width: 2.0,
                    radius: 16.0.into(),
                },
                ..container::Style::default()
            });

        let mut content = column![mouse_area(zone).on_press(Message::BrowseRequested)]
            .spacing(16)
            .max_width(640)
            .align_x(Alignment::Center);

        if let Some(error) = &self.error {
            content = content.push(text(error.to_string()).size(14).color(theme::danger()));
        }

        content = content.push(
            button(text("Take the style quiz").size(14))
                .on_press_maybe(self.quiz_available().then_some(Message::QuizOpened))
                .style(button::text),
        );

        content.into()
    }
}
