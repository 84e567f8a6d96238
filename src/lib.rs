pub mod capture;
pub mod config;
pub mod display;
pub mod error;
pub mod locator;
pub mod logging;
pub mod pipeline;
pub mod region;
pub mod session;
pub mod utils;

// Re-export commonly used items
pub use config::{AppConfig, DetectionConfig, Mode};
pub use error::{DetectionError, Result};
pub use locator::{locate_eyes, locate_faces, CascadeModel, Classifier};
pub use pipeline::{process_frame, FaceDetection, FrameReport};
pub use region::{EyeRegion, FaceRegion, FaceSpace, FrameSpace, Region};
