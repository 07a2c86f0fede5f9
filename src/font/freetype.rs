//! FreeType wrapper
//!
//! Parses every scalable format FreeType knows (TrueType, OpenType/CFF,
//! Type 1, ...) and renders grayscale coverage bitmaps.
//!
//! The face keeps the current size and glyph slot as internal state, so
//! every call re-applies the size it needs. `LegacyFont` is neither
//! `Send` nor `Sync`.

use super::{read_caret_slope, CaretSlope, FontFormat, HintingMode, LineMetrics, RasterGlyph, Typeface};
use crate::constants::{FIXED_26_6_ONE, MAX_GLYPH_DIMENSION, POINTS_PER_INCH};
use crate::error::{Error, ParseError, Result};
use freetype::bitmap::PixelMode;
use freetype::face::{KerningMode, LoadFlag};
use freetype::render_mode::RenderMode;
use freetype::Library;
use log::{debug, info, warn};
use std::rc::Rc;

impl HintingMode {
    fn to_load_flag(self) -> LoadFlag {
        match self {
            Self::Normal => LoadFlag::TARGET_NORMAL,
            Self::Light => LoadFlag::TARGET_LIGHT,
            Self::None => LoadFlag::NO_HINTING,
        }
    }
}

/// 26.6 FreeType position -> pixels
fn from_26_6(v: freetype::ffi::FT_Pos) -> f32 {
    v as f32 / FIXED_26_6_ONE as f32
}

/// FreeType font
pub struct LegacyFont {
    // Declared before `library` so the face is released first
    face: freetype::Face,
    #[allow(dead_code)]
    library: Library,
    caret_slope: CaretSlope,
}

impl LegacyFont {
    /// Load from font data
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let library = Library::init().map_err(ParseError::FreeType)?;

        // Type 1 and other non-sfnt formats have no hhea table
        let caret_slope = read_caret_slope(&data).unwrap_or(CaretSlope::UPRIGHT);

        // freetype-rs requires Rc<Vec<u8>>
        let face = library
            .new_memory_face(Rc::new(data), 0)
            .map_err(ParseError::FreeType)?;

        let family = face.family_name().unwrap_or_else(|| "unknown".to_string());
        info!(
            "FreeType font loaded: {} ({}, {} units/em)",
            family,
            if face.is_sfnt() { "sfnt" } else { "legacy" },
            face.em_size()
        );

        Ok(Self {
            face,
            library,
            caret_slope,
        })
    }

    /// Family name reported by FreeType
    pub fn family_name(&self) -> Option<String> {
        self.face.family_name()
    }

    fn set_size(&self, px: f32) -> Result<()> {
        if !px.is_finite() || px <= 0.0 {
            return Err(Error::Measure(format!("invalid pixel size {}", px)));
        }
        let char_height = (px * FIXED_26_6_ONE as f32).round() as isize;
        let dpi = POINTS_PER_INCH as u32;
        self.face
            .set_char_size(0, char_height, dpi, dpi)
            .map_err(|e| Error::Measure(format!("FreeType size setting failed: {:?}", e)))
    }

    fn load(&self, glyph: u32, px: f32, hinting: HintingMode) -> Result<()> {
        self.set_size(px)?;
        let load_flags = LoadFlag::DEFAULT | hinting.to_load_flag();
        self.face
            .load_glyph(glyph, load_flags)
            .map_err(|e| Error::Measure(format!("FreeType glyph {} load failed: {:?}", glyph, e)))
    }
}

impl std::fmt::Debug for LegacyFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyFont")
            .field("family", &self.face.family_name())
            .field("units_per_em", &self.face.em_size())
            .field("caret_slope", &self.caret_slope)
            .finish()
    }
}

impl Typeface for LegacyFont {
    fn format(&self) -> FontFormat {
        FontFormat::Legacy
    }

    fn units_per_em(&self) -> f32 {
        self.face.em_size() as f32
    }

    fn line_metrics(&self, px: f32) -> LineMetrics {
        if self.set_size(px).is_err() {
            return LineMetrics::fallback(px);
        }
        match self.face.size_metrics() {
            Some(m) => {
                let ascent = from_26_6(m.ascender);
                let descent = from_26_6(m.descender);
                let new_line_size = from_26_6(m.height);
                LineMetrics {
                    ascent,
                    descent,
                    line_gap: new_line_size - (ascent - descent),
                    new_line_size,
                }
            }
            None => LineMetrics::fallback(px),
        }
    }

    fn caret_slope(&self) -> CaretSlope {
        self.caret_slope
    }

    fn glyph_index(&self, ch: char) -> u32 {
        self.face.get_char_index(ch as usize).unwrap_or(0)
    }

    fn advance(&self, glyph: u32, px: f32, hinting: HintingMode) -> Result<f32> {
        self.load(glyph, px, hinting)?;
        Ok(from_26_6(self.face.glyph().advance().x))
    }

    fn kern(&self, left: u32, right: u32, px: f32) -> f32 {
        if !self.face.has_kerning() || self.set_size(px).is_err() {
            return 0.0;
        }
        match self.face.get_kerning(left, right, KerningMode::KerningDefault) {
            Ok(v) => from_26_6(v.x),
            Err(e) => {
                debug!("FreeType kerning {}/{} failed: {:?}", left, right, e);
                0.0
            }
        }
    }

    fn rasterize(&self, glyph: u32, px: f32, hinting: HintingMode) -> Option<RasterGlyph> {
        if let Err(e) = self.load(glyph, px, hinting) {
            debug!("{}", e);
            return None;
        }

        let slot = self.face.glyph();
        if slot.render_glyph(RenderMode::Normal).is_err() {
            return None;
        }

        let bitmap = slot.bitmap();
        let width = bitmap.width().max(0) as u32;
        let height = bitmap.rows().max(0) as u32;
        let left = slot.bitmap_left();
        let top = slot.bitmap_top();

        if width == 0 || height == 0 {
            // Empty glyph (e.g., space)
            return Some(RasterGlyph {
                coverage: vec![],
                width: 0,
                height: 0,
                left,
                top,
            });
        }

        if width > MAX_GLYPH_DIMENSION || height > MAX_GLYPH_DIMENSION {
            warn!("FreeType: glyph too large ({}x{}), skipping", width, height);
            return None;
        }

        let buffer = bitmap.buffer();
        let pitch = bitmap.pitch().unsigned_abs() as usize;
        let mut coverage = Vec::with_capacity((width as usize) * (height as usize));

        match bitmap.pixel_mode() {
            Ok(PixelMode::Gray) => {
                for y in 0..height as usize {
                    let row = &buffer[y * pitch..y * pitch + width as usize];
                    coverage.extend_from_slice(row);
                }
            }
            Ok(PixelMode::Mono) => {
                // 1 bit per pixel, MSB first
                for y in 0..height as usize {
                    for x in 0..width as usize {
                        let byte = buffer[y * pitch + x / 8];
                        let on = (byte >> (7 - (x % 8))) & 1 == 1;
                        coverage.push(if on { 255 } else { 0 });
                    }
                }
            }
            other => {
                warn!("FreeType: unsupported pixel mode {:?}, skipping", other.ok());
                return None;
            }
        }

        Some(RasterGlyph {
            coverage,
            width,
            height,
            left,
            top,
        })
    }
}
