//! Font loading and the glyph capability interface
//!
//! Handles:
//! - TTF/OTF font loading (fontdue)
//! - Legacy scalable formats (FreeType, `freetype` feature)
//! - Face construction at a size/DPI/hinting mode
//!
//! Both parsers implement [`Typeface`]; everything downstream (faces,
//! drawing, measurement) works against `&dyn Typeface`.

pub mod face;
#[cfg(feature = "freetype")]
pub mod freetype;
#[cfg(test)]
pub(crate) mod mock;
pub mod sfnt;

use crate::constants::{HHEA_CARET_SLOPE_RISE, HHEA_CARET_SLOPE_RUN};
use crate::error::Result;
use log::debug;
use memmap2::Mmap;
use rustybuzz::ttf_parser;
use std::fs::File;
use std::io::Read;

pub use face::{Face, FaceMetrics, FaceOptions, GlyphMask, HintingMode, PlacedGlyph};
#[cfg(feature = "freetype")]
pub use self::freetype::LegacyFont;
pub use sfnt::Font;

/// Which parser produced a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// TrueType/OpenType container parsed by fontdue
    Sfnt,
    /// Any format FreeType accepts (TrueType, Type 1, CFF, ...)
    Legacy,
}

/// Caret slope as stored in the font (rise over run, font units)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretSlope {
    /// caretSlopeRun
    pub x: i32,
    /// caretSlopeRise
    pub y: i32,
}

impl CaretSlope {
    /// Vertical caret, used when the font carries no hhea table
    pub const UPRIGHT: Self = Self { x: 0, y: 1 };
}

impl Default for CaretSlope {
    fn default() -> Self {
        Self::UPRIGHT
    }
}

/// Vertical line metrics in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to the top of the tallest glyph (positive)
    pub ascent: f32,
    /// Distance from baseline to the lowest glyph extent (typically negative)
    pub descent: f32,
    /// Recommended gap between lines
    pub line_gap: f32,
    /// ascent - descent + line_gap
    pub new_line_size: f32,
}

impl LineMetrics {
    /// Estimate for fonts without horizontal metrics
    pub fn fallback(px: f32) -> Self {
        Self {
            ascent: px * 0.8,
            descent: -px * 0.2,
            line_gap: 0.0,
            new_line_size: px,
        }
    }
}

/// Coverage bitmap of one glyph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterGlyph {
    /// Coverage, 1 byte/pixel, rows top to bottom
    pub coverage: Vec<u8>,
    /// Bitmap width (pixels)
    pub width: u32,
    /// Bitmap height (pixels)
    pub height: u32,
    /// Horizontal offset from the glyph origin to the bitmap's left edge
    pub left: i32,
    /// Vertical offset from the baseline up to the bitmap's top edge
    pub top: i32,
}

impl RasterGlyph {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Parsed font: metrics and rasterization
///
/// Glyph ids are font-internal indices; 0 is the notdef glyph, which
/// [`Typeface::glyph_index`] returns for characters the font lacks.
/// Sizes are in pixels per em.
pub trait Typeface {
    /// Parser that produced this font
    fn format(&self) -> FontFormat;

    /// Design units per em square
    fn units_per_em(&self) -> f32;

    /// Horizontal line metrics at `px`
    fn line_metrics(&self, px: f32) -> LineMetrics;

    /// Caret slope from the hhea table
    fn caret_slope(&self) -> CaretSlope;

    /// Glyph id for a character (0 when missing)
    fn glyph_index(&self, ch: char) -> u32;

    /// Horizontal advance in pixels
    fn advance(&self, glyph: u32, px: f32, hinting: HintingMode) -> Result<f32>;

    /// Pair kerning in pixels (0 when the font has none)
    fn kern(&self, left: u32, right: u32, px: f32) -> f32;

    /// Rasterize to a coverage bitmap. `None` if the glyph cannot be rendered.
    fn rasterize(&self, glyph: u32, px: f32, hinting: HintingMode) -> Option<RasterGlyph>;
}

/// Read caretSlopeRise/caretSlopeRun straight from the hhea table
///
/// Returns `None` for data that isn't an sfnt or has no usable hhea.
pub(crate) fn read_caret_slope(data: &[u8]) -> Option<CaretSlope> {
    let raw = ttf_parser::RawFace::parse(data, 0).ok()?;
    let hhea = raw.table(ttf_parser::Tag::from_bytes(b"hhea"))?;
    let read_i16 = |offset: usize| -> Option<i32> {
        let bytes = hhea.get(offset..offset + 2)?;
        Some(i16::from_be_bytes([bytes[0], bytes[1]]) as i32)
    };
    let slope = CaretSlope {
        x: read_i16(HHEA_CARET_SLOPE_RUN)?,
        y: read_i16(HHEA_CARET_SLOPE_RISE)?,
    };
    debug!("hhea caret slope: rise={} run={}", slope.y, slope.x);
    Some(slope)
}

/// Read an entire stream and parse it as an sfnt font
///
/// Fails with [`Error::Read`](crate::Error::Read) if the stream can't be
/// consumed, [`Error::Parse`](crate::Error::Parse) if the bytes aren't a font.
pub fn parse_font<R: Read>(mut reader: R) -> Result<Font> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Font::from_bytes(&data)
}

/// Parse font data that is already in memory
pub fn parse_font_bytes(data: &[u8]) -> Result<Font> {
    Font::from_bytes(data)
}

/// Parse a font file through a read-only memory map
///
/// The file is never copied into an intermediate buffer.
pub fn parse_font_file(file: &File) -> Result<Font> {
    // SAFETY: the map is read-only and dropped before returning; the
    // parser copies what it keeps.
    let map = unsafe { Mmap::map(file)? };
    Font::from_bytes(&map)
}

/// Read an entire stream and parse it with FreeType
#[cfg(feature = "freetype")]
pub fn parse_legacy_font<R: Read>(mut reader: R) -> Result<LegacyFont> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    LegacyFont::from_bytes(data)
}

/// Unwrap a font load result or panic.
///
/// Intended for initialization-time assets, where a missing font is a
/// deployment defect. Never use on a per-request path; handle the
/// `Result` instead.
#[track_caller]
pub fn must_font<F>(result: Result<F>) -> F {
    match result {
        Ok(font) => font,
        Err(e) => panic!("{}", e),
    }
}

/// Like [`must_font`], but also panics when loading succeeded without
/// producing a font.
#[track_caller]
pub fn must_font_opt<F>(result: Result<Option<F>>) -> F {
    match must_font(result) {
        Some(font) => font,
        None => panic!("font is nil"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Minimal sfnt with only an hhea table
    fn hhea_only(rise: i16, run: i16) -> Vec<u8> {
        let mut hhea = vec![0u8; 36];
        hhea[0..4].copy_from_slice(&[0, 1, 0, 0]);
        hhea[18..20].copy_from_slice(&rise.to_be_bytes());
        hhea[20..22].copy_from_slice(&run.to_be_bytes());

        let mut data = Vec::new();
        // Offset table: sfnt version, numTables=1, searchRange, entrySelector, rangeShift
        data.extend_from_slice(&[0, 1, 0, 0, 0, 1, 0, 16, 0, 0, 0, 0]);
        // Table record: tag, checksum, offset, length
        data.extend_from_slice(b"hhea");
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&28u32.to_be_bytes());
        data.extend_from_slice(&(hhea.len() as u32).to_be_bytes());
        data.extend_from_slice(&hhea);
        data
    }

    #[test]
    fn test_read_caret_slope() {
        assert_eq!(
            read_caret_slope(&hhea_only(1, 0)),
            Some(CaretSlope { x: 0, y: 1 })
        );
        assert_eq!(
            read_caret_slope(&hhea_only(1000, -213)),
            Some(CaretSlope { x: -213, y: 1000 })
        );
        assert_eq!(read_caret_slope(b"not a font"), None);
    }

    #[test]
    fn test_parse_font_rejects_garbage() {
        let err = parse_font(&b"definitely not a font"[..]).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn test_parse_font_read_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"))
            }
        }
        let err = parse_font(Broken).unwrap_err();
        assert!(matches!(err, Error::Read(_)), "got {:?}", err);
    }

    #[test]
    fn test_must_font_passes_value_through() {
        assert_eq!(must_font(Ok::<_, Error>(7)), 7);
        assert_eq!(must_font_opt(Ok::<_, Error>(Some("f"))), "f");
    }

    #[test]
    #[should_panic(expected = "failed to parse font")]
    fn test_must_font_panics_on_error() {
        must_font(parse_font_bytes(b"\x00\x01\x00\x00garbage"));
    }

    #[test]
    #[should_panic(expected = "font is nil")]
    fn test_must_font_opt_panics_on_none() {
        must_font_opt::<Font>(Ok(None));
    }
}
