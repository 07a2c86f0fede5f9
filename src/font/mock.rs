//! Deterministic typeface for unit tests

use super::{CaretSlope, FontFormat, HintingMode, LineMetrics, RasterGlyph, Typeface};
use crate::error::Result;

/// Fixed-metric typeface: every glyph is a filled square of
/// half an em, advancing 0.6 em. "AV" kerns by -0.1 em.
pub struct BoxFont;

impl Typeface for BoxFont {
    fn format(&self) -> FontFormat {
        FontFormat::Sfnt
    }
    fn units_per_em(&self) -> f32 {
        1000.0
    }
    fn line_metrics(&self, px: f32) -> LineMetrics {
        LineMetrics {
            ascent: px * 0.75,
            descent: -px * 0.25,
            line_gap: px * 0.15,
            new_line_size: px * 1.15,
        }
    }
    fn caret_slope(&self) -> CaretSlope {
        CaretSlope::UPRIGHT
    }
    fn glyph_index(&self, ch: char) -> u32 {
        if ch.is_ascii() {
            ch as u32
        } else {
            0
        }
    }
    fn advance(&self, _glyph: u32, px: f32, _hinting: HintingMode) -> Result<f32> {
        Ok(px * 0.6)
    }
    fn kern(&self, left: u32, right: u32, px: f32) -> f32 {
        if left == 'A' as u32 && right == 'V' as u32 {
            -px * 0.1
        } else {
            0.0
        }
    }
    fn rasterize(&self, glyph: u32, px: f32, _hinting: HintingMode) -> Option<RasterGlyph> {
        if glyph == ' ' as u32 {
            return Some(RasterGlyph::default());
        }
        let side = (px * 0.5) as u32;
        Some(RasterGlyph {
            coverage: vec![255; (side * side) as usize],
            width: side,
            height: side,
            left: 1,
            top: side as i32,
        })
    }
}
