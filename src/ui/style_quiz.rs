/// Style quiz card: one question at a time, progress dots on top
use iced::widget::{button, column, container, row, text, Column, Row};
use iced::{Alignment, Border, Element, Length, Theme};

use super::theme;
use crate::state::quiz::{StyleQuiz, QUESTIONS};
use crate::Message;

pub fn view(quiz: &StyleQuiz) -> Element<'_, Message> {
    let question = quiz.current();

    let dots: Row<Message> = (0..QUESTIONS.len()).fold(row![].spacing(8), |dots, i| {
        let color = if i <= quiz.step() {
            theme::pink()
        } else {
            theme::muted()
        };
        dots.push(text(if i <= quiz.step() { "━━" } else { "━" }).color(color))
    });

    let list: Column<Message> = column![].spacing(10).width(Length::Fill);
    let options = question.options.iter().fold(list, |options, option| {
        options.push(
            button(text(*option).size(15))
                .width(Length::Fill)
                .padding(14)
                .style(button::secondary)
                .on_press_maybe(
                    (!quiz.is_saving()).then(|| Message::QuizAnswered(option.to_string())),
                ),
        )
    });

    let mut body = column![
        dots,
        text(format!("Question {} of {}", quiz.step() + 1, QUESTIONS.len()))
            .size(12)
            .color(theme::muted()),
        text(question.prompt).size(22),
        options,
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    if quiz.is_saving() {
        body = body.push(text("Saving your style...").size(12).color(theme::muted()));
    } else {
        body = body.push(
            button(text("Skip for now").size(12))
                .style(button::text)
                .on_press(Message::QuizClosed),
        );
    }

    let border = theme::accent(0).border;
    container(body)
        .padding(36)
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
