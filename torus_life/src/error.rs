// error.rs - Failures raised by the grid and its configuration

use thiserror::Error;

/// Errors raised by [`LifeGrid`](crate::LifeGrid) operations.
///
/// Every failing call leaves the grid exactly as it was.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum GridError {
    #[error("grid size must be positive, got {size}")]
    InvalidSize { size: usize },
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("density {density} must be between 0.0 and 1.0")]
    InvalidDensity { density: f64 },
}
