//! Colours and glyphs for the terminal seat map

use ratatui::style::{Color, Modifier, Style};
use seatmap_core::{FillRole, SeatStatus, SeatVisual};

pub const SELECTED: Color = Color::Rgb(0x3b, 0x82, 0xf6);
pub const AVAILABLE: Color = Color::Rgb(0x10, 0xb9, 0x81);
pub const RESERVED: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
pub const SOLD: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const HELD: Color = Color::Rgb(0x8b, 0x5c, 0xf6);

pub const BORDER: Color = Color::Rgb(80, 80, 100);
pub const MUTED: Color = Color::DarkGray;
pub const ACCENT: Color = Color::Cyan;

pub fn fill_color(role: FillRole) -> Color {
    match role {
        FillRole::Selected => SELECTED,
        FillRole::Available => AVAILABLE,
        FillRole::Reserved => RESERVED,
        FillRole::Sold => SOLD,
        FillRole::Held => HELD,
    }
}

pub fn status_color(status: SeatStatus) -> Color {
    match status {
        SeatStatus::Available => AVAILABLE,
        SeatStatus::Reserved => RESERVED,
        SeatStatus::Sold => SOLD,
        SeatStatus::Held => HELD,
    }
}

/// One cell per seat
pub fn seat_glyph(visual: SeatVisual) -> &'static str {
    match visual.fill {
        FillRole::Selected => "●",
        FillRole::Available => "○",
        FillRole::Reserved => "◐",
        FillRole::Sold => "✕",
        FillRole::Held => "◇",
    }
}

pub fn seat_style(visual: SeatVisual, has_cursor: bool) -> Style {
    let mut style = Style::default().fg(fill_color(visual.fill));
    if visual.emphasized {
        style = style.add_modifier(Modifier::BOLD);
    }
    if visual.dimmed {
        style = style.add_modifier(Modifier::DIM);
    }
    if has_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}
