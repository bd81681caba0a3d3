use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TerrainError>;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid dimension must be odd, got {dimension}")]
    EvenDimension { dimension: usize },

    #[error("grid dimension must be at least 3, got {dimension}")]
    DimensionTooSmall { dimension: usize },

    #[error("grid dimension must be 2^k + 1 (3, 5, 9, 17, 33, 65, ...), got {dimension}")]
    DimensionNotPowerOfTwoPlusOne { dimension: usize },

    #[error("amplitude {amplitude} exceeds the maximum of {max}")]
    AmplitudeTooLarge { amplitude: u32, max: u32 },

    #[error("expected {expected} cells for a {dimension}x{dimension} grid, got {actual}")]
    CellCountMismatch {
        dimension: usize,
        expected: usize,
        actual: usize,
    },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid palette: {message}")]
    InvalidPalette { message: String },
}

impl TerrainError {
    pub fn invalid_palette(message: impl Into<String>) -> Self {
        Self::InvalidPalette {
            message: message.into(),
        }
    }
}
