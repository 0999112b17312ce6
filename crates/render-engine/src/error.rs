//! Rendering error types

use thiserror::Error;

/// Failures while building or capturing the off-screen surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markup failed to compile: {0}")]
    Compile(String),

    #[error("document produced no pages")]
    NoPages,

    #[error("rendered surface has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("captured pixel buffer is empty or truncated")]
    EmptyCapture,
}
