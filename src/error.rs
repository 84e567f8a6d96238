use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetectionError>;

/// Failures that end the current run. Empty detections are not errors.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("failed to load cascade classifier from {path:?}")]
    ClassifierLoad { path: PathBuf },

    #[error("failed to read the image {path:?}")]
    ImageDecode { path: PathBuf },

    #[error("unable to open camera #{index}")]
    CameraOpen { index: i32 },

    #[error("failed to get frame from the camera")]
    FrameRead,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
