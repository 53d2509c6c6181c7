use thiserror::Error;

/// Errors emitted by visual perception operations.
#[derive(Debug, Error)]
pub enum VisualError {
    #[error("frame capture failed: {0}")]
    CaptureFailed(String),

    #[error("image processing error: {0}")]
    ImageProcessing(String),

    #[error("visual detection failed: {0}")]
    DetectionFailed(String),

    #[error("frame diff failed: {0}")]
    DiffFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for VisualError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageProcessing(err.to_string())
    }
}
