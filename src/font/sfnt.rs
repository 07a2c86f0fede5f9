//! sfnt fonts (TrueType / OpenType) backed by fontdue
//!
//! fontdue keeps parsed outlines in memory, so a [`Font`] owns
//! everything it needs and is `Send + Sync`.

use super::{read_caret_slope, CaretSlope, FontFormat, HintingMode, LineMetrics, RasterGlyph, Typeface};
use crate::constants::MAX_GLYPH_DIMENSION;
use crate::error::{Error, ParseError, Result};
use fontdue::FontSettings;
use log::{info, warn};

/// Parsed sfnt font
pub struct Font {
    inner: fontdue::Font,
    caret_slope: CaretSlope,
}

impl Font {
    /// Parse TTF/OTF data. The parser's error is returned verbatim.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let inner = fontdue::Font::from_bytes(data, FontSettings::default())
            .map_err(ParseError::Sfnt)?;

        let caret_slope = read_caret_slope(data).unwrap_or_else(|| {
            warn!("Font has no readable hhea table, assuming upright caret");
            CaretSlope::UPRIGHT
        });

        info!(
            "Font loaded: {} glyphs, {} units/em",
            inner.glyph_count(),
            inner.units_per_em()
        );

        Ok(Self { inner, caret_slope })
    }

    /// Number of glyphs in the font
    pub fn glyph_count(&self) -> u16 {
        self.inner.glyph_count()
    }

    /// Whether the font maps `ch` to a real glyph
    pub fn has_glyph(&self, ch: char) -> bool {
        self.inner.has_glyph(ch)
    }

    fn index(&self, glyph: u32) -> Option<u16> {
        u16::try_from(glyph)
            .ok()
            .filter(|&i| i < self.inner.glyph_count())
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("glyphs", &self.inner.glyph_count())
            .field("units_per_em", &self.inner.units_per_em())
            .field("caret_slope", &self.caret_slope)
            .finish()
    }
}

impl Typeface for Font {
    fn format(&self) -> FontFormat {
        FontFormat::Sfnt
    }

    fn units_per_em(&self) -> f32 {
        self.inner.units_per_em()
    }

    fn line_metrics(&self, px: f32) -> LineMetrics {
        match self.inner.horizontal_line_metrics(px) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: m.descent,
                line_gap: m.line_gap,
                new_line_size: m.new_line_size,
            },
            None => LineMetrics::fallback(px),
        }
    }

    fn caret_slope(&self) -> CaretSlope {
        self.caret_slope
    }

    fn glyph_index(&self, ch: char) -> u32 {
        self.inner.lookup_glyph_index(ch) as u32
    }

    fn advance(&self, glyph: u32, px: f32, hinting: HintingMode) -> Result<f32> {
        let index = self
            .index(glyph)
            .ok_or_else(|| Error::Measure(format!("glyph {} out of range", glyph)))?;
        let advance = self.inner.metrics_indexed(index, px).advance_width;
        // fontdue has no hinter; hinted modes snap advances to whole pixels
        Ok(match hinting {
            HintingMode::None => advance,
            HintingMode::Light | HintingMode::Normal => advance.round(),
        })
    }

    fn kern(&self, left: u32, right: u32, px: f32) -> f32 {
        match (self.index(left), self.index(right)) {
            (Some(l), Some(r)) => self.inner.horizontal_kern_indexed(l, r, px).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn rasterize(&self, glyph: u32, px: f32, _hinting: HintingMode) -> Option<RasterGlyph> {
        let index = self.index(glyph)?;

        // Bitmap size is known before rasterizing allocates it
        let bounds = self.inner.metrics_indexed(index, px);
        if bounds.width as u32 > MAX_GLYPH_DIMENSION || bounds.height as u32 > MAX_GLYPH_DIMENSION {
            warn!(
                "fontdue: glyph too large ({}x{}), skipping",
                bounds.width, bounds.height
            );
            return None;
        }

        let (metrics, coverage) = self.inner.rasterize_indexed(index, px);
        let width = metrics.width as u32;
        let height = metrics.height as u32;

        Some(RasterGlyph {
            coverage,
            width,
            height,
            left: metrics.xmin,
            top: metrics.ymin + metrics.height as i32,
        })
    }
}
