/// Results view: impression, category cards, product picks, style profile
///
/// Rendering goes through small view-models (`CategoryCard`, `ProductCard`)
/// so ordering, icon fallback, accents and shop links can be tested without
/// a window.

use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Border, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use super::theme::{self, Accent};
use super::vibe_song;
use crate::state::data::{AnalysisResult, CategoryIcon, Product, StyleProfile};
use crate::state::preview::Preview;
use crate::state::song::VibeSong;
use crate::Message;

/// Width of one category card in the grid
const CARD_WIDTH: f32 = 420.0;

/// One category, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCard<'a> {
    pub title: &'a str,
    pub icon: CategoryIcon,
    pub accent: Accent,
    pub tips: &'a [String],
    pub product: Option<ProductCard<'a>>,
}

/// A clickable product suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard<'a> {
    pub name: &'a str,
    pub why: Option<&'a str>,
    pub shop_url: String,
}

impl<'a> ProductCard<'a> {
    pub fn from_product(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            why: product.why.as_deref(),
            shop_url: product.shop_url(),
        }
    }
}

/// Cards in the order the backend sent the categories
pub fn category_cards(result: &AnalysisResult) -> Vec<CategoryCard<'_>> {
    result
        .categories
        .iter()
        .enumerate()
        .map(|(i, category)| CategoryCard {
            title: &category.name,
            icon: category.icon,
            accent: theme::accent(i),
            tips: &category.tips,
            product: category.product.as_ref().map(ProductCard::from_product),
        })
        .collect()
}

/// Chips for the style profile card: tag first, then the answers
pub fn profile_chips(profile: &StyleProfile) -> Vec<&str> {
    let mut chips = Vec::new();
    if let Some(tag) = profile.style_tag.as_deref() {
        chips.push(tag);
    }
    if let Some(answers) = &profile.answers {
        chips.extend(
            [&answers.vibe, &answers.priority, &answers.budget]
                .into_iter()
                .filter_map(|a| a.as_deref()),
        );
    }
    chips
}

fn card_style(border: iced::Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        border: Border {
            color: border,
            width: 1.0,
            radius: 16.0.into(),
        },
        ..container::Style::default()
    }
}

fn product_view<'a>(product: ProductCard<'a>, accent: Accent) -> Element<'a, Message> {
    let mut body: Column<Message> = column![
        text("Buy Now").size(11).color(accent.text),
        text(product.name).size(15).color(accent.text),
    ]
    .spacing(4);

    if let Some(why) = product.why {
        body = body.push(text(why).size(12).color(theme::muted()));
    }
    body = body.push(text("Shop on Google →").size(11).color(theme::cyan()));

    button(body)
        .width(Length::Fill)
        .padding(12)
        .style(button::secondary)
        .on_press(Message::ShopOpened(product.shop_url))
        .into()
}

fn category_view(card: CategoryCard<'_>) -> Element<'_, Message> {
    let accent = card.accent;

    let header = row![
        text(card.icon.glyph()).size(20),
        text(card.title).size(17).color(accent.text),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let tips = card.tips.iter().fold(column![].spacing(8), |tips, tip| {
        tips.push(
            row![
                text("•").color(accent.text),
                text(tip.as_str()).size(14).color(theme::muted()),
            ]
            .spacing(8),
        )
    });

    let mut body = column![header, tips].spacing(16);
    if let Some(product) = card.product {
        body = body.push(product_view(product, accent));
    }

    container(body)
        .padding(20)
        .width(Length::Fixed(CARD_WIDTH))
        .style(card_style(accent.border))
        .into()
}

fn picks_view(products: &[Product], refreshing: bool) -> Element<'_, Message> {
    let refresh = button(text(if refreshing { "Refreshing…" } else { "↻ New picks" }).size(12))
        .style(button::text)
        .on_press_maybe((!refreshing).then_some(Message::RecommendationsRequested));

    let header = row![
        text("More Picks").size(12).color(theme::cyan()),
        iced::widget::horizontal_space(),
        refresh,
    ]
    .align_y(Alignment::Center);

    let cards: Vec<Element<Message>> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            container(product_view(ProductCard::from_product(product), theme::accent(i)))
                .width(Length::Fixed(CARD_WIDTH))
                .into()
        })
        .collect();

    column![header, Wrap::with_elements(cards).spacing(20.0).line_spacing(20.0)]
        .spacing(12)
        .into()
}

fn profile_view(profile: &StyleProfile) -> Element<'_, Message> {
    let chips = profile_chips(profile)
        .into_iter()
        .enumerate()
        .fold(row![].spacing(10), |chips, (i, chip)| {
            let accent = theme::accent(i);
            chips.push(
                container(text(chip.to_uppercase()).size(12).color(accent.text))
                    .padding([6, 14])
                    .style(card_style(accent.border)),
            )
        });

    let body = column![
        text("Your Style Profile").size(12).color(theme::pink()),
        chips,
        text("Your recommendations above were tailored to this profile.")
            .size(12)
            .color(theme::muted()),
        button(text("Retake Quiz").size(12))
            .style(button::text)
            .on_press(Message::QuizOpened),
    ]
    .spacing(14)
    .align_x(Alignment::Center);

    container(body)
        .padding(24)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(card_style(theme::accent(0).border))
        .into()
}

pub fn view<'a>(
    result: &'a AnalysisResult,
    preview: Option<&'a Preview>,
    song: &'a VibeSong,
    profile: &'a StyleProfile,
    refreshing: bool,
) -> Element<'a, Message> {
    let mut content: Column<Message> = column![].spacing(32).align_x(Alignment::Center);

    if let Some(preview) = preview {
        content = content.push(
            image(preview.handle())
                .height(Length::Fixed(320.0))
                .content_fit(ContentFit::Contain),
        );
    }

    if result.has_impression() {
        content = content.push(
            container(
                column![
                    text("Overall Impression").size(12).color(theme::purple()),
                    text(result.overall_impression.as_str()).size(15),
                ]
                .spacing(10)
                .align_x(Alignment::Center),
            )
            .padding(28)
            .max_width(760)
            .style(card_style(theme::accent(2).border)),
        );
        content = content.push(vibe_song::view(song));
    }

    let cards: Vec<Element<Message>> = category_cards(result)
        .into_iter()
        .map(category_view)
        .collect();

    let improvements_header = row![
        text("Room Improvements & Recommended Products")
            .size(12)
            .color(theme::cyan()),
        iced::widget::horizontal_space(),
    ];
    content = content
        .push(improvements_header)
        .push(Wrap::with_elements(cards).spacing(20.0).line_spacing(20.0));

    match result.products.as_deref() {
        Some(products) if !products.is_empty() => {
            content = content.push(picks_view(products, refreshing));
        }
        _ => {
            content = content.push(
                button(text(if refreshing { "Finding picks…" } else { "Get more product picks" }).size(13))
                    .style(button::secondary)
                    .on_press_maybe((!refreshing).then_some(Message::RecommendationsRequested)),
            );
        }
    }

    if !profile.is_empty() {
        content = content.push(profile_view(profile));
    }

    content
        .push(
            button(text("Analyze Another Room").size(15))
                .padding([12, 40])
                .style(button::primary)
                .on_press(Message::ResetRequested),
        )
        .max_width(960)
        .into()
}
