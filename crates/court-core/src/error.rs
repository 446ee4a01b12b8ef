//! Geometry construction errors.

use thiserror::Error;

/// Errors raised while building court geometry from a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Arc needs at least one segment, got {0}")]
    InvalidSegments(u32),

    #[error("Arc radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("Invalid net descriptor: {0}")]
    InvalidNet(String),
}

/// Result type for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;
