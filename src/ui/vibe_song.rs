/// Room anthem card: generate, play/pause, regenerate, lyrics
use iced::widget::{button, column, container, row, text, Row};
use iced::{Alignment, Border, Element, Length, Theme};

use super::theme;
use crate::state::song::{SongPhase, VibeSong};
use crate::Message;

pub fn view(song: &VibeSong) -> Element<'_, Message> {
    let label = column![
        text("Room Anthem").size(14).color(theme::purple()),
        text("AI-generated song · may take ~30s to generate")
            .size(12)
            .color(theme::muted()),
    ]
    .spacing(4);

    let mut controls: Row<Message> = row![].spacing(12).align_y(Alignment::Center);
    controls = match song.phase() {
        SongPhase::Idle => controls.push(
            button(text("♫ Generate Room Anthem").size(14))
                .padding([10, 20])
                .style(button::primary)
                .on_press(Message::AnthemRequested),
        ),
        SongPhase::Loading => controls.push(
            text("Composing… (~30s)").size(14).color(theme::purple()),
        ),
        SongPhase::Ready => controls
            .push(
                button(text(if song.is_playing() { "❚❚ Pause" } else { "▶ Play Anthem" }).size(14))
                    .padding([10, 20])
                    .style(button::success)
                    .on_press(Message::AnthemToggled),
            )
            .push(
                button(text("↻ New anthem").size(12))
                    .style(button::text)
                    .on_press(Message::AnthemRequested),
            ),
        SongPhase::Error => controls.push(
            button(text("Failed. Try again").size(14).color(theme::danger()))
                .style(button::text)
                .on_press(Message::AnthemRequested),
        ),
    };

    let mut body = column![row![label, iced::widget::horizontal_space(), controls]
        .align_y(Alignment::Center)]
    .spacing(20);

    if let Some(lyrics) = song.lyrics() {
        body = body.push(
            column![
                text("Lyrics").size(11).color(theme::muted()),
                text(lyrics).size(14),
            ]
            .spacing(8),
        );
    }

    let border = theme::accent(2).border;
    container(body)
        .padding(24)
        .width(Length::Fill)
        .max_width(960)
        .style(move |_theme: &Theme| container::Style {
            border: Border {
                color: border,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}
