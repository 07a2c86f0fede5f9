//! glyphink - draw and measure text on raster images
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   Font loading (parse_font / must_font)  │
//! │   fontdue (sfnt)  |  FreeType (legacy)   │
//! ├──────────────────────────────────────────┤
//! │        Typeface  →  Face (size, DPI)     │
//! │                          ↓               │
//! │   draw_text → Surface (image buffers)    │
//! │   extents / text_max_extents (Context)   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ```no_run
//! use glyphink::{must_font, parse_font, Face, Point26_6, TextExt};
//! use image::{Rgba, RgbaImage};
//!
//! let file = std::fs::File::open("DejaVuSansMono.ttf").unwrap();
//! let font = must_font(parse_font(file));
//! let face = Face::with_size(&font, 12.0);
//!
//! let mut img = RgbaImage::from_pixel(100, 20, Rgba([255, 255, 255, 255]));
//! let caret = img.text(Point26_6::from_ints(0, 0), Rgba([0, 0, 0, 255]), &face, "Hi");
//! println!("caret at {}, {}", caret.x, caret.y);
//! ```

pub mod config;
pub mod constants;
pub mod drawing;
pub mod error;
pub mod font;
pub mod utils;

pub use config::Config;
pub use drawing::{draw_text, extents, text_max_extents, Context, Surface, TextExt};
pub use error::{Error, ParseError, Result};
#[cfg(feature = "freetype")]
pub use font::{parse_legacy_font, LegacyFont};
pub use font::{
    must_font, must_font_opt, parse_font, parse_font_bytes, parse_font_file, CaretSlope, Face,
    FaceMetrics, FaceOptions, Font, FontFormat, HintingMode, Typeface,
};
pub use utils::fixed::{Fix32, Int26_6, Point26_6};
