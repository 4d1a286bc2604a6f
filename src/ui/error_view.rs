/// Analysis failure card with a retry action
use iced::widget::{button, column, container, text};
use iced::{Alignment, Border, Element, Theme};

use super::theme;
use crate::Message;

pub fn view(message: &str) -> Element<'_, Message> {
    let body = column![
        text("!").size(40).color(theme::danger()),
        text("Something went wrong").size(18),
        text(message).size(14).color(theme::muted()),
        button(text("Try Again").size(14))
            .padding([12, 32])
            .style(button::primary)
            .on_press(Message::ResetRequested),
    ]
    .spacing(14)
    .align_x(Alignment::Center);

    let border = theme::danger();
    container(body)
        .padding(32)
        .max_width(520)
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
