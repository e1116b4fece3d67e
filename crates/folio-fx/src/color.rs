//! Color helpers for the effects.

use ratatui::style::Color;

/// Build an RGB color from a `0xRRGGBB` literal.
pub const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Scale an RGB color towards black. Non-RGB colors pass through.
pub fn scale_rgb(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

/// Blend an RGB color towards white by `amount`.
pub fn brighten(color: Color, amount: f32) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    let lift = |c: u8| (c as f32 + (255.0 - c as f32) * amount) as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(lift(r), lift(g), lift(b)),
        other => other,
    }
}
