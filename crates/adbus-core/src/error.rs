//! Unified error types for the allocation core.
//!
//! This module provides a common error type [`AdbusError`] spanning the three
//! fatal-error categories the allocation pipeline recognizes: malformed or
//! unreadable input (structural), duplicate identifiers (semantic), and
//! out-of-range numeric values (boundary). All three are treated as fatal by
//! the driver: a diagnostic is logged and the process exits non-zero.
//!
//! # Example
//!
//! ```ignore
//! use adbus_core::{AdbusError, AdbusResult};
//!
//! fn load_routes(path: &str) -> AdbusResult<()> {
//!     let routes = parse_routes(path)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for the allocation pipeline.
///
/// Each variant corresponds to one of the three fatal error buckets the
/// specification defines; `Io` covers unopenable-file cases uniformly across
/// all three parsers.
#[derive(Error, Debug)]
pub enum AdbusError {
    /// I/O errors (unopenable file, read failure).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input-structural errors: missing required key, malformed number,
    /// non-single-character age token, open polygon.
    #[error("malformed input at {source}: {message}")]
    Structural { source: String, message: String },

    /// Semantic-duplicate errors: a `meshId` or `outputId` repeated across
    /// features.
    #[error("duplicate identifier in {source}: {id}")]
    DuplicateId { source: String, id: String },

    /// Numeric-boundary errors: non-finite cost/coordinate, negative bus
    /// count.
    #[error("numeric value out of range in {source}: {message}")]
    NumericBoundary { source: String, message: String },

    /// Generic errors (for wrapping external errors).
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using AdbusError.
pub type AdbusResult<T> = Result<T, AdbusError>;

impl AdbusError {
    /// Build a structural error tagged with the offending source (typically
    /// a file path).
    pub fn structural(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structural {
            source: source.into(),
            message: message.into(),
        }
    }

    /// Build a duplicate-identifier error tagged with the offending source.
    pub fn duplicate_id(source: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            source: source.into(),
            id: id.into(),
        }
    }

    /// Build a numeric-boundary error tagged with the offending source.
    pub fn numeric_boundary(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NumericBoundary {
            source: source.into(),
            message: message.into(),
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for AdbusError {
    fn from(err: anyhow::Error) -> Self {
        AdbusError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for AdbusError {
    fn from(s: String) -> Self {
        AdbusError::Other(s)
    }
}

impl From<&str> for AdbusError {
    fn from(s: &str) -> Self {
        AdbusError::Other(s.to_string())
    }
}
