//! Hex color parsing for canvas backgrounds.

use image::Rgba;

use super::error::{IconError, Result};

/// Fully transparent black, the default canvas fill.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
///
/// Six-digit colors are fully opaque.
pub fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

/// Like [`parse_hex_color`], reporting failures as validation errors.
pub fn color_from_hex(hex: &str) -> Result<Rgba<u8>> {
    parse_hex_color(hex)
        .ok_or_else(|| IconError::validation(format!("invalid color `{hex}`, expected #RRGGBB")))
}
