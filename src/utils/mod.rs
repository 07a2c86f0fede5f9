//! Utility functions shared across glyphink
//!
//! Fixed-point coordinates and color helpers.

pub mod color;
pub mod fixed;

pub use color::{parse_hex_color, parse_hex_rgba};
pub use fixed::{Fix32, Int26_6, Point26_6};
