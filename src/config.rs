use std::path::PathBuf;

use clap::Parser;

use crate::error::{DetectionError, Result};
use crate::utils::constants::{
    K_DEFAULT_CASCADE_FILE_EYE, K_DEFAULT_CASCADE_FILE_FACE, K_MIN_NEIGHBORS, K_SCALE_FACTOR,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "Detect faces and the eyes inside them with Haar cascades")]
pub struct Args {
    /// Path to the image file (if not specified, frames are taken from the camera stream)
    #[clap(short, long, value_parser)]
    pub image: Option<PathBuf>,

    /// Path to the cascade file for face detection
    #[clap(short = 'f', long, default_value = K_DEFAULT_CASCADE_FILE_FACE)]
    pub cascade_file_face: PathBuf,

    /// Path to the cascade file for eye detection
    #[clap(short = 'e', long, default_value = K_DEFAULT_CASCADE_FILE_EYE)]
    pub cascade_file_eye: PathBuf,

    /// Ratio between successive scanning scales (must be greater than 1.0)
    #[clap(short, long, default_value_t = K_SCALE_FACTOR)]
    pub scale_factor: f64,

    /// Overlapping raw detections required to keep a face
    #[clap(short, long, default_value_t = K_MIN_NEIGHBORS)]
    pub min_neighbors: u32,

    /// Capture device index used in camera mode
    #[clap(short, long, default_value = "0")]
    pub camera: i32,

    /// Do not draw rectangles on the frames
    #[clap(long)]
    pub no_annotate: bool,
}

/// Parameters of the face cascade scan, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    pub scale_factor: f64,
    pub min_neighbors: u32,
}

impl DetectionConfig {
    pub fn new(scale_factor: f64, min_neighbors: u32) -> Result<Self> {
        if !scale_factor.is_finite() || scale_factor <= 1.0 {
            return Err(DetectionError::InvalidConfig(format!(
                "scale factor must be greater than 1.0, got {scale_factor}"
            )));
        }
        if i32::try_from(min_neighbors).is_err() {
            return Err(DetectionError::InvalidConfig(format!(
                "min neighbors out of range: {min_neighbors}"
            )));
        }
        Ok(Self {
            scale_factor,
            min_neighbors,
        })
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            scale_factor: K_SCALE_FACTOR,
            min_neighbors: K_MIN_NEIGHBORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    StillImage(PathBuf),
    Camera(i32),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub cascade_file_face: PathBuf,
    pub cascade_file_eye: PathBuf,
    pub detection: DetectionConfig,
    pub annotate: bool,
}

impl TryFrom<Args> for AppConfig {
    type Error = DetectionError;

    fn try_from(args: Args) -> Result<Self> {
        let detection = DetectionConfig::new(args.scale_factor, args.min_neighbors)?;
        let mode = match args.image {
            Some(path) => Mode::StillImage(path),
            None => Mode::Camera(args.camera),
        };
        Ok(Self {
            mode,
            cascade_file_face: args.cascade_file_face,
            cascade_file_eye: args.cascade_file_eye,
            detection,
            annotate: !args.no_annotate,
        })
    }
}
