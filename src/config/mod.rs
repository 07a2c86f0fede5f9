//! Configuration
//!
//! Loads TOML rendering settings: face size/DPI/hinting, parser backend
//! and the default ink color. Every field has a default, so an empty
//! document is a valid config.

use crate::error::Result as FontResult;
use crate::font::{parse_font_bytes, FaceOptions, HintingMode, Typeface};
use crate::utils::color::parse_hex_rgba;
use anyhow::{Context, Result};
use image::Rgba;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rendering settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
    /// Text settings
    pub text: TextConfig,
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font size (points)
    pub size: f32,
    /// Dots per inch
    pub dpi: f32,
    /// Hinting mode: "none" | "light" | "normal"
    pub hinting: String,
    /// Parser: "sfnt" (fontdue) | "freetype"
    pub backend: String,
}

/// Text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Ink color (RRGGBB, RRGGBBAA or RGB)
    pub color: String,
}

/// Font parser selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Sfnt,
    FreeType,
}

impl Backend {
    /// Convert from config string
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "freetype" | "legacy" => Self::FreeType,
            "sfnt" | "fontdue" => Self::Sfnt,
            other => {
                warn!("Unknown font backend {:?}, using sfnt", other);
                Self::Sfnt
            }
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 12.0,
            dpi: 72.0,
            hinting: "none".to_string(), // Fractional advances, matches measurement
            backend: "sfnt".to_string(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            color: "000000".to_string(),
        }
    }
}

impl FontConfig {
    /// Face options for these settings
    pub fn face_options(&self) -> FaceOptions {
        FaceOptions {
            size: self.size,
            dpi: self.dpi,
            hinting: HintingMode::from_str(&self.hinting),
        }
    }

    pub fn backend(&self) -> Backend {
        Backend::from_str(&self.backend)
    }
}

impl TextConfig {
    /// Ink color, black if the configured value doesn't parse
    pub fn ink(&self) -> Rgba<u8> {
        parse_hex_rgba(&self.color).unwrap_or_else(|| {
            warn!("Invalid text color {:?}, using black", self.color);
            Rgba([0, 0, 0, 255])
        })
    }
}

impl Config {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        Ok(config)
    }

    /// Load settings from specified path
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!("Loaded config: {}", path.display());
        Ok(config)
    }

    /// Parse font data with the configured backend
    pub fn load_font(&self, data: &[u8]) -> FontResult<Box<dyn Typeface>> {
        match self.font.backend() {
            Backend::Sfnt => Ok(Box::new(parse_font_bytes(data)?)),
            #[cfg(feature = "freetype")]
            Backend::FreeType => Ok(Box::new(crate::font::LegacyFont::from_bytes(data.to_vec())?)),
            #[cfg(not(feature = "freetype"))]
            Backend::FreeType => {
                warn!("Built without FreeType support, using sfnt parser");
                Ok(Box::new(parse_font_bytes(data)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.font.size, 12.0);
        assert_eq!(config.font.dpi, 72.0);
        assert_eq!(config.font.backend(), Backend::Sfnt);
        assert_eq!(config.font.face_options(), FaceOptions::default());
        assert_eq!(config.text.ink(), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::from_toml_str(
            r##"
            [font]
            size = 18.0
            hinting = "light"
            backend = "freetype"

            [text]
            color = "#ff000080"
            "##,
        )
        .unwrap();

        assert_eq!(config.font.size, 18.0);
        assert_eq!(config.font.dpi, 72.0);
        assert_eq!(config.font.face_options().hinting, HintingMode::Light);
        assert_eq!(config.font.backend(), Backend::FreeType);
        assert_eq!(config.text.ink(), Rgba([255, 0, 0, 128]));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_toml_str("[text]\ncolor = \"nope\"\n[font]\nbackend = \"gdi\"").unwrap();
        assert_eq!(config.text.ink(), Rgba([0, 0, 0, 255]));
        assert_eq!(config.font.backend(), Backend::Sfnt);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::from_toml_str("[font\nsize = ").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::load_from_file("/nonexistent/glyphink.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let config = Config::default();
        assert!(config.load_font(b"garbage").is_err());
    }
}
