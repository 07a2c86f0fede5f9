//! Global constants for glyphink
//!
//! Consolidates fixed-point scales and rendering defaults
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Fixed-Point Constants
// ============================================================================

/// Subunits per pixel in 26.6 fixed point
pub const FIXED_26_6_ONE: i32 = 64;

/// Subunits per pixel in 24.8 fixed point (measurement context)
pub const FIX32_ONE: i32 = 256;

// ============================================================================
// Rendering Constants
// ============================================================================

/// Points per inch; a point equals a pixel at this DPI
pub const POINTS_PER_INCH: f32 = 72.0;

/// DPI used by the measurement context
pub const MEASURE_DPI: f32 = 72.0;

/// Default font size (points)
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Glyphs larger than this in either dimension are skipped
/// (guards against OOM from malformed fonts)
pub const MAX_GLYPH_DIMENSION: u32 = 4096;

/// hhea table offset of caretSlopeRise (i16, big endian)
pub const HHEA_CARET_SLOPE_RISE: usize = 18;

/// hhea table offset of caretSlopeRun (i16, big endian)
pub const HHEA_CARET_SLOPE_RUN: usize = 20;
