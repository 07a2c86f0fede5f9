//! Text extents
//!
//! [`extents`] measures a string through a [`Context`]; [`text_max_extents`]
//! is the cheap em-square upper bound.

use crate::constants::{DEFAULT_FONT_SIZE, FIX32_ONE, MEASURE_DPI, POINTS_PER_INCH};
use crate::error::{Error, Result};
use crate::font::{HintingMode, Typeface};
use crate::utils::fixed::Fix32;
use log::debug;

/// Measurement context: a font at a size and DPI
///
/// Measurements come back in 24.8 fixed point.
#[derive(Clone, Copy)]
pub struct Context<'f> {
    font: Option<&'f dyn Typeface>,
    dpi: f32,
    font_size: f32,
    hinting: HintingMode,
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self {
            font: None,
            dpi: MEASURE_DPI,
            font_size: DEFAULT_FONT_SIZE,
            hinting: HintingMode::None,
        }
    }
}

impl<'f> Context<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context at 72 DPI for `font` at `font_size` points
    pub fn for_font(font: &'f dyn Typeface, font_size: f32) -> Self {
        let mut ctx = Self::new();
        ctx.set_dpi(MEASURE_DPI);
        ctx.set_font(font);
        ctx.set_font_size(font_size);
        ctx
    }

    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }

    pub fn set_font(&mut self, font: &'f dyn Typeface) {
        self.font = Some(font);
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size;
    }

    pub fn set_hinting(&mut self, hinting: HintingMode) {
        self.hinting = hinting;
    }

    /// Pixels per em at the current size and DPI
    fn pixels_per_em(&self) -> f32 {
        self.font_size * self.dpi / POINTS_PER_INCH
    }

    /// Convert a length in points to 24.8 pixels at the current DPI
    pub fn point_to_fix32(&self, points: f32) -> Fix32 {
        Fix32((points * self.dpi * (FIX32_ONE as f32 / POINTS_PER_INCH)) as i32)
    }

    /// Measure `text` as (width, height) in 24.8 fixed point.
    ///
    /// Width is the sum of glyph advances plus pair kerning; height is
    /// the font's ascent-to-descent span. The empty string is (0, 0).
    pub fn measure_string(&self, text: &str) -> Result<(Fix32, Fix32)> {
        let font = self
            .font
            .ok_or_else(|| Error::Measure("no font set".to_string()))?;

        let px = self.pixels_per_em();
        if !px.is_finite() || px <= 0.0 {
            return Err(Error::Measure(format!("invalid font size {}", self.font_size)));
        }

        if text.is_empty() {
            return Ok((Fix32::ZERO, Fix32::ZERO));
        }

        let mut width = Fix32::ZERO;
        let mut prev: Option<u32> = None;
        for ch in text.chars() {
            let glyph = font.glyph_index(ch);
            if let Some(prev) = prev {
                width += Fix32::from_f32(font.kern(prev, glyph, px));
            }
            width += Fix32::from_f32(font.advance(glyph, px, self.hinting)?);
            prev = Some(glyph);
        }

        let line = font.line_metrics(px);
        let height = Fix32::from_f32((line.ascent - line.descent).ceil());

        Ok((width, height))
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("font", &self.font.map(|font| font.format()))
            .field("dpi", &self.dpi)
            .field("font_size", &self.font_size)
            .field("hinting", &self.hinting)
            .finish()
    }
}

/// Width and height of `text` in whole pixels.
///
/// Returns (0, 0) when measurement fails, so a failure is
/// indistinguishable from the empty string.
pub fn extents(font: &dyn Typeface, font_size: f32, text: &str) -> (i32, i32) {
    let ctx = Context::for_font(font, font_size);
    match ctx.measure_string(text) {
        Ok((w, h)) => (w.to_pixels(), h.to_pixels()),
        Err(e) => {
            debug!("extents of {:?} unavailable: {}", text, e);
            (0, 0)
        }
    }
}

/// Upper bound on the extents of `text`: one em square per UTF-8 byte.
///
/// Counting bytes rather than characters leaves room for glyphs wider
/// than an em, which are outside ASCII. Single line only: newlines count
/// and the height is one em.
pub fn text_max_extents(font: &dyn Typeface, font_size: f32, text: &str) -> (i32, i32) {
    let ctx = Context::for_font(font, font_size);
    let em = ctx.point_to_fix32(font_size).0 >> 8;
    (text.len() as i32 * em, em)
}
