//! Error types for lumafield.
//!
//! Configuration problems are the only errors this crate surfaces as values.
//! Everything that can go wrong inside a tick (frame not ready, degenerate
//! analysis buffer, out-of-range sampling) is handled by degrading that tick,
//! never by propagating an error up the stack.

use std::fmt;

/// Errors produced when validating a [`StyleConfig`](crate::StyleConfig).
///
/// An invalid configuration never panics the tick loop. The simulation clamps
/// or disables the affected feature instead; `ConfigError` exists so hosts
/// that want to validate up front can report precisely what is wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Particle spacing must be a positive number of pixels.
    NonPositiveGap(i32),
    /// The palette must contain at least one color.
    EmptyPalette,
    /// Minimum particle size exceeds the maximum.
    InvalidSizeRange {
        /// Configured minimum size.
        min: f32,
        /// Configured maximum size.
        max: f32,
    },
    /// Friction must lie strictly between 0 and 1.
    FrictionOutOfRange(f32),
    /// Trail persistence must lie in [0, 1].
    TrailOutOfRange(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveGap(gap) => {
                write!(f, "Particle gap must be > 0, got {}", gap)
            }
            ConfigError::EmptyPalette => write!(f, "Palette must contain at least one color"),
            ConfigError::InvalidSizeRange { min, max } => {
                write!(f, "Particle size range is inverted: min {} > max {}", min, max)
            }
            ConfigError::FrictionOutOfRange(v) => {
                write!(f, "Friction must be in (0, 1), got {}", v)
            }
            ConfigError::TrailOutOfRange(v) => {
                write!(f, "Trail persistence must be in [0, 1], got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while loading a still frame from disk.
#[derive(Debug)]
pub enum FrameError {
    /// Failed to decode the image data.
    ImageLoad(image::ImageError),
    /// Failed to read the file from disk.
    Io(std::io::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::ImageLoad(e) => write!(f, "Failed to decode frame: {}", e),
            FrameError::Io(e) => write!(f, "Failed to read frame file: {}", e),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::ImageLoad(e) => Some(e),
            FrameError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for FrameError {
    fn from(e: image::ImageError) -> Self {
        FrameError::ImageLoad(e)
    }
}

impl From<std::io::Error> for FrameError {
    fn from(e: std::io::Error) -> Self {
        FrameError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = ConfigError::NonPositiveGap(0);
        assert!(e.to_string().contains("gap"));

        let e = ConfigError::InvalidSizeRange { min: 9.0, max: 2.0 };
        assert!(e.to_string().contains("9"));
        assert!(e.to_string().contains("2"));
    }
}
