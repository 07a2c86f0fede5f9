//! Color parsing and compositing utilities
//!
//! Hex parsing for configured ink colors, plus the "over" operator used
//! when a glyph coverage mask is composited onto a surface.

use image::Rgba;

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse hex color to RGBA.
///
/// Accepts everything [`parse_hex_color`] does (alpha = 255) plus the
/// 8-digit "RRGGBBAA" form.
pub fn parse_hex_rgba(hex: &str) -> Option<Rgba<u8>> {
    let trimmed = hex.trim_start_matches('#');
    if trimmed.len() == 8 && trimmed.is_ascii() {
        let (r, g, b) = parse_hex_color(&trimmed[0..6])?;
        let a = u8::from_str_radix(&trimmed[6..8], 16).ok()?;
        return Some(Rgba([r, g, b, a]));
    }
    let (r, g, b) = parse_hex_color(trimmed)?;
    Some(Rgba([r, g, b, 255]))
}

/// Composite `ink` masked by `coverage` over an opaque channel value.
///
/// `dst` is a single color channel; `ink_c` the matching ink channel.
#[inline]
pub fn over_opaque(dst: u8, ink_c: u8, ink_alpha: u8, coverage: u8) -> u8 {
    let sa = (ink_alpha as f32 / 255.0) * (coverage as f32 / 255.0);
    (ink_c as f32 * sa + dst as f32 * (1.0 - sa)).round() as u8
}

/// Composite `ink` masked by `coverage` over a straight-alpha RGBA pixel.
///
/// # Arguments
/// * `dst` - Destination color [r, g, b, a]
/// * `ink` - Source color [r, g, b, a]
/// * `coverage` - Glyph coverage (0 = untouched, 255 = full ink)
pub fn over_rgba(dst: [u8; 4], ink: [u8; 4], coverage: u8) -> [u8; 4] {
    let sa = (ink[3] as f32 / 255.0) * (coverage as f32 / 255.0);
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |i: usize| -> u8 {
        let c = (ink[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    [
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ]
}
