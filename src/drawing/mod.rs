//! Drawing and measuring text on raster surfaces
//!
//! This module provides:
//! - Glyph compositing onto `image` buffers ([`Surface`])
//! - String drawing with caret advancement ([`draw_text`])
//! - Accurate and em-square extents ([`extents`], [`text_max_extents`])

pub mod extents;
pub mod surface;
pub mod text;

// Re-export commonly used items
pub use extents::{extents, text_max_extents, Context};
pub use surface::Surface;
pub use text::{baseline_origin, draw_text, TextExt};
