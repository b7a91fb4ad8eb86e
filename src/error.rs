//! Error taxonomy for engine construction and driver configuration

use thiserror::Error;

/// Errors raised while building grids, engines or frame parameters
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("seed component {index} is {value}, expected an integer in [1, 30000]")]
    InvalidSeed { index: usize, value: i64 },
    #[error("grid dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: usize, height: usize },
    #[error("stamp count {0} must lie in [0, 4294967295]")]
    InvalidStampCount(i64),
    #[error("contrast exponent {0} must be finite and non-negative")]
    InvalidContrast(f64),
    #[error("attenuation {0} must lie in [0, 1]")]
    InvalidAttenuation(f64),
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Config(#[from] serde_json::Error),
}
