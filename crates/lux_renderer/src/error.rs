//! Error types for configuration, buffers and output.
//!
//! The integrator itself has no error paths; degenerate geometry shows up as
//! NaN pixels, not as errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image has zero area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Buffer is {buffer_width}x{buffer_height} but frame is {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        buffer_width: u32,
        buffer_height: u32,
    },

    #[error("Triangle {triangle} references unknown material {material}")]
    UnknownMaterial { triangle: usize, material: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
