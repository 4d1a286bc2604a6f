/// Shown while the analysis call is in flight
use iced::widget::{column, image, text, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::theme;
use crate::state::preview::Preview;
use crate::Message;

pub fn view(preview: Option<&Preview>) -> Element<'_, Message> {
    let mut content: Column<Message> = column![].spacing(24).align_x(Alignment::Center);

    if let Some(preview) = preview {
        content = content.push(
            image(preview.handle())
                .height(Length::Fixed(288.0))
                .content_fit(ContentFit::Contain),
        );
    }

    content
        .push(text("◌").size(48).color(theme::purple()))
        .push(text("Analyzing your space…").size(22).color(theme::cyan()))
        .push(
            text("Our AI is studying every detail of your room")
                .size(14)
                .color(theme::muted()),
        )
        .into()
}
