//! Error types
//!
//! Loading errors are returned to the caller. Measurement errors are
//! only surfaced by [`Context::measure_string`](crate::Context::measure_string);
//! [`extents`](crate::extents) downgrades them to a zero-sized result.

use thiserror::Error;

/// Font parser failure, carried verbatim from the underlying library
#[derive(Debug, Error)]
pub enum ParseError {
    /// fontdue rejected the data
    #[error("{0}")]
    Sfnt(&'static str),
    /// FreeType rejected the data
    #[cfg(feature = "freetype")]
    #[error("{0}")]
    FreeType(freetype::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    /// The byte stream could not be fully consumed
    #[error("failed to read font data: {0}")]
    Read(#[from] std::io::Error),

    /// The bytes are not a valid font
    #[error("failed to parse font: {0}")]
    Parse(#[from] ParseError),

    /// Text could not be measured
    #[error("failed to measure text: {0}")]
    Measure(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_verbatim() {
        let err = Error::from(ParseError::Sfnt("Font: bad magic"));
        assert_eq!(err.to_string(), "failed to parse font: Font: bad magic");
    }

    #[test]
    fn test_io_error_converts_to_read() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        assert!(matches!(Error::from(io), Error::Read(_)));
    }
}
