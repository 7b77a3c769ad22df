//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `sir-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    #[error("grid extent must be non-negative and finite, got {width} x {height}")]
    InvalidExtent { width: f64, height: f64 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
