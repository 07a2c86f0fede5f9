//! Font faces
//!
//! A [`Face`] binds a borrowed font to a size, DPI and hinting mode and
//! answers metrics and glyph queries in 26.6 fixed point.

use super::{CaretSlope, Typeface};
use crate::constants::{DEFAULT_FONT_SIZE, POINTS_PER_INCH};
use crate::utils::fixed::{Int26_6, Point26_6};
use log::debug;

/// Hinting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintingMode {
    /// No hinting, fractional advances
    #[default]
    None,
    /// Light hinting (natural curves, whole-pixel advances)
    Light,
    /// Normal hinting (sharp, slightly thicker)
    Normal,
}

impl HintingMode {
    /// Convert from config string
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "normal" | "full" => Self::Normal,
            _ => Self::None,
        }
    }

    /// Whether metrics snap to whole pixels
    pub fn is_hinted(self) -> bool {
        self != Self::None
    }
}

/// Face construction options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOptions {
    /// Font size in points
    pub size: f32,
    /// Dots per inch
    pub dpi: f32,
    pub hinting: HintingMode,
}

impl Default for FaceOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            dpi: POINTS_PER_INCH,
            hinting: HintingMode::None,
        }
    }
}

impl FaceOptions {
    /// Options for `size` points at 72 DPI, unhinted
    pub fn with_size(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Pixels per em
    pub fn pixels_per_em(&self) -> f32 {
        self.size * self.dpi / POINTS_PER_INCH
    }
}

/// Face-wide metrics in 26.6 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMetrics {
    /// Recommended baseline-to-baseline distance
    pub height: Int26_6,
    /// Distance from the baseline to the top of a line (positive)
    pub ascent: Int26_6,
    /// Distance from the baseline to the bottom of a line (positive)
    pub descent: Int26_6,
    /// Slope of the caret (run, rise)
    pub caret_slope: CaretSlope,
}

/// Coverage mask positioned on the destination
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask {
    /// Destination x of the mask's left column
    pub x: i32,
    /// Destination y of the mask's top row
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// 1 byte/pixel coverage, rows top to bottom
    pub coverage: Vec<u8>,
}

/// Result of placing one glyph at a dot
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    /// `None` for blank glyphs (spaces) and glyphs the rasterizer skipped
    pub mask: Option<GlyphMask>,
    /// Horizontal advance to the next dot
    pub advance: Int26_6,
}

/// A font bound to a rendering size
///
/// The face borrows its font, so the font outlives every draw or
/// measure call made through the face.
#[derive(Clone, Copy)]
pub struct Face<'f> {
    font: &'f dyn Typeface,
    options: FaceOptions,
}

impl<'f> Face<'f> {
    pub fn new(font: &'f dyn Typeface, options: FaceOptions) -> Self {
        Self { font, options }
    }

    /// Face at `size` points, 72 DPI, unhinted
    pub fn with_size(font: &'f dyn Typeface, size: f32) -> Self {
        Self::new(font, FaceOptions::with_size(size))
    }

    pub fn font(&self) -> &'f dyn Typeface {
        self.font
    }

    pub fn options(&self) -> &FaceOptions {
        &self.options
    }

    /// Pixels per em
    pub fn pixels_per_em(&self) -> f32 {
        self.options.pixels_per_em()
    }

    fn fixed(&self, v: f32) -> Int26_6 {
        if self.options.hinting.is_hinted() {
            Int26_6::from_int(v.round() as i32)
        } else {
            Int26_6::from_f32(v)
        }
    }

    /// Face-wide metrics
    pub fn metrics(&self) -> FaceMetrics {
        let line = self.font.line_metrics(self.pixels_per_em());
        FaceMetrics {
            height: self.fixed(line.new_line_size),
            ascent: self.fixed(line.ascent),
            descent: self.fixed(-line.descent),
            caret_slope: self.font.caret_slope(),
        }
    }

    /// Glyph id for a character (0 = notdef)
    pub fn glyph_index(&self, ch: char) -> u32 {
        self.font.glyph_index(ch)
    }

    /// Kerning between two glyphs
    pub fn kern(&self, left: u32, right: u32) -> Int26_6 {
        self.fixed(self.font.kern(left, right, self.pixels_per_em()))
    }

    /// Horizontal advance of a glyph, zero if the font can't load it
    pub fn glyph_advance(&self, glyph: u32) -> Int26_6 {
        match self
            .font
            .advance(glyph, self.pixels_per_em(), self.options.hinting)
        {
            Ok(advance) => Int26_6::from_f32(advance),
            Err(e) => {
                debug!("advance of glyph {} unavailable: {}", glyph, e);
                Int26_6::ZERO
            }
        }
    }

    /// Rasterize `glyph` with its origin at `dot` (rounded to whole pixels)
    pub fn glyph(&self, dot: Point26_6, glyph: u32) -> PlacedGlyph {
        let advance = self.glyph_advance(glyph);
        let raster = self
            .font
            .rasterize(glyph, self.pixels_per_em(), self.options.hinting)
            .filter(|r| !r.is_empty());

        let mask = raster.map(|r| GlyphMask {
            x: dot.x.round() + r.left,
            y: dot.y.round() - r.top,
            width: r.width,
            height: r.height,
            coverage: r.coverage,
        });

        PlacedGlyph { mask, advance }
    }
}

impl std::fmt::Debug for Face<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Face")
            .field("format", &self.font.format())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::mock::BoxFont;

    #[test]
    fn test_hinting_from_str() {
        assert_eq!(HintingMode::from_str("light"), HintingMode::Light);
        assert_eq!(HintingMode::from_str("NORMAL"), HintingMode::Normal);
        assert_eq!(HintingMode::from_str("none"), HintingMode::None);
        assert_eq!(HintingMode::from_str("bogus"), HintingMode::None);
    }

    #[test]
    fn test_pixels_per_em_scales_with_dpi() {
        let opts = FaceOptions {
            size: 12.0,
            dpi: 144.0,
            hinting: HintingMode::None,
        };
        assert_eq!(opts.pixels_per_em(), 24.0);
        assert_eq!(FaceOptions::with_size(10.0).pixels_per_em(), 10.0);
    }

    #[test]
    fn test_metrics() {
        let face = Face::with_size(&BoxFont, 20.0);
        let m = face.metrics();
        assert_eq!(m.height, Int26_6::from_int(23));
        assert_eq!(m.ascent, Int26_6::from_int(15));
        assert_eq!(m.descent, Int26_6::from_int(5));
        assert_eq!(m.caret_slope, CaretSlope::UPRIGHT);
    }

    #[test]
    fn test_hinted_metrics_snap() {
        let face = Face::new(
            &BoxFont,
            FaceOptions {
                size: 13.0,
                dpi: 72.0,
                hinting: HintingMode::Light,
            },
        );
        // 14.95px
        assert_eq!(face.metrics().height, Int26_6::from_int(15));
    }

    #[test]
    fn test_glyph_placement() {
        let face = Face::with_size(&BoxFont, 20.0);
        let dot = Point26_6::new(Int26_6(3 * 64 + 40), Int26_6::from_int(15));
        let placed = face.glyph(dot, 'A' as u32);

        assert_eq!(placed.advance, Int26_6::from_int(12));
        let mask = placed.mask.expect("box glyph has a mask");
        // x: round(3.625) + left(1), y: 15 - top(10)
        assert_eq!((mask.x, mask.y), (5, 5));
        assert_eq!((mask.width, mask.height), (10, 10));
    }

    #[test]
    fn test_blank_glyph_has_no_mask() {
        let face = Face::with_size(&BoxFont, 20.0);
        let placed = face.glyph(Point26_6::default(), ' ' as u32);
        assert!(placed.mask.is_none());
        assert_eq!(placed.advance, Int26_6::from_int(12));
    }
}
