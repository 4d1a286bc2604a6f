/// Neon accent palette shared by the views
use iced::Color;

/// Accent hex values, cycled per category card
const ACCENT_HEX: [(u8, u8, u8); 4] = [
    (0xff, 0x2d, 0x7b), // pink
    (0x00, 0xf0, 0xff), // cyan
    (0xb3, 0x47, 0xea), // purple
    (0xff, 0x9f, 0x43), // orange
];

pub const ACCENT_COUNT: usize = ACCENT_HEX.len();

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accent {
    /// Titles and bullets
    pub text: Color,
    /// Card border
    pub border: Color,
}

/// Accent for the card at `index`; deterministic, wraps around the palette
pub fn accent(index: usize) -> Accent {
    let (r, g, b) = ACCENT_HEX[index % ACCENT_COUNT];
    let text = Color::from_rgb8(r, g, b);
    Accent {
        text,
        border: Color { a: 0.35, ..text },
    }
}

pub fn pink() -> Color {
    accent(0).text
}

pub fn cyan() -> Color {
    accent(1).text
}

pub fn purple() -> Color {
    accent(2).text
}

pub fn muted() -> Color {
    Color::from_rgba(1.0, 1.0, 1.0, 0.55)
}

pub fn danger() -> Color {
    Color::from_rgb8(0xf8, 0x71, 0x71)
}
