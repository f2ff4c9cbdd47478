//! Error types for osgrid tile sources.

use thiserror::Error;

/// Result type alias using TileError.
pub type TileResult<T> = Result<T, TileError>;

/// Broad class of a [`TileError`].
///
/// Neither class is retryable: configuration errors surface at construction,
/// address range errors are caller bugs surfaced per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    AddressRange,
}

/// Primary error type for tile addressing and request composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    // === Configuration Errors ===
    #[error("Tile source requires a non-empty API key")]
    MissingApiKey,

    #[error("Invalid resolution table: {0}")]
    InvalidResolutions(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    // === Address Range Errors ===
    #[error("Zoom level {zoom} outside the served range {min}..={max}")]
    ZoomOutOfRange { zoom: i64, min: i64, max: i64 },

    #[error("Tile {axis} coordinate must be a finite integer, got {value}")]
    NonIntegerCoordinate { axis: &'static str, value: f64 },

    #[error("Tile coordinate overflow while computing {0}")]
    CoordinateOverflow(&'static str),
}

impl TileError {
    /// Shorthand for an [`TileError::InvalidConfig`] error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        TileError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the error class for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TileError::MissingApiKey
            | TileError::InvalidResolutions(_)
            | TileError::InvalidConfig { .. }
            | TileError::UnsupportedCrs(_) => ErrorCategory::Configuration,

            TileError::ZoomOutOfRange { .. }
            | TileError::NonIntegerCoordinate { .. }
            | TileError::CoordinateOverflow(_) => ErrorCategory::AddressRange,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_address_error(&self) -> bool {
        self.category() == ErrorCategory::AddressRange
    }
}
