//! Error types for particlefx.
//!
//! The simulation itself never fails. Errors only come from the edges:
//! parsing configuration and acquiring or presenting a drawing surface.

use std::fmt;

/// A color string that is not `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid color '{}': expected #RRGGBB or #AARRGGBB",
            self.0
        )
    }
}

impl std::error::Error for ParseColorError {}

/// An effect name that does not match any built-in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEffectError(pub String);

impl fmt::Display for ParseEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown effect '{}': expected linked-web, meteor-shower, rainfall or rainfall-with-petals",
            self.0
        )
    }
}

impl std::error::Error for ParseEffectError {}

/// Errors that can occur while loading a view configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors raised while acquiring or presenting a frame.
///
/// A failed frame is skipped by the render loop; particle state is untouched.
#[derive(Debug)]
pub enum FrameError {
    /// The host has no drawable surface right now.
    SurfaceUnavailable(String),
    /// Encoding the rendered frame failed.
    Image(image::ImageError),
    /// Writing the rendered frame failed.
    Io(std::io::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SurfaceUnavailable(msg) => write!(f, "Surface unavailable: {}", msg),
            FrameError::Image(e) => write!(f, "Failed to encode frame: {}", e),
            FrameError::Io(e) => write!(f, "Failed to write frame: {}", e),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::SurfaceUnavailable(_) => None,
            FrameError::Image(e) => Some(e),
            FrameError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for FrameError {
    fn from(e: image::ImageError) -> Self {
        FrameError::Image(e)
    }
}

impl From<std::io::Error> for FrameError {
    fn from(e: std::io::Error) -> Self {
        FrameError::Io(e)
    }
}
