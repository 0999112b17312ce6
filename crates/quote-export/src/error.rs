//! Export error taxonomy

use render_engine::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Layout or rasterization of the quote surface failed
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// The captured pixels could not be encoded into a PDF
    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    /// The whole export did not finish within the deadline
    #[error("export timed out after {0}ms")]
    Timeout(u64),

    /// The exported document could not be delivered by email
    #[error("email delivery failed: {0}")]
    EmailDeliveryFailed(String),
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        ExportError::CaptureFailed(err.to_string())
    }
}
