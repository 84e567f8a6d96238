use std::fmt;

use log::trace;
use opencv::prelude::*;

use crate::config::DetectionConfig;
use crate::error::Result;
use crate::locator::{self, Classifier};
use crate::region::{EyeRegion, FaceRegion};
use crate::utils::helpers;

#[derive(Debug, Clone, PartialEq)]
pub struct FaceDetection {
    pub face: FaceRegion,
    pub eyes: Vec<EyeRegion>,
}

impl FaceDetection {
    pub fn eyes_in_frame(&self) -> impl Iterator<Item = FaceRegion> + '_ {
        self.eyes.iter().map(|eye| eye.to_frame(&self.face))
    }
}

/// Everything found in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub detections: Vec<FaceDetection>,
}

impl FrameReport {
    pub fn face_count(&self) -> usize {
        self.detections.len()
    }

    pub fn eye_count(&self) -> usize {
        self.detections.iter().map(|d| d.eyes.len()).sum()
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Faces Detected", self.face_count())?;
        for detection in &self.detections {
            write!(f, ", {} Eyes Detected", detection.eyes.len())?;
        }
        Ok(())
    }
}

/// Runs the face cascade on `frame`, then the eye cascade on each face crop.
///
/// Crops are taken before any annotation so the drawn outlines never feed
/// into eye detection. Faces reaching past the frame edge are clamped; a face
/// with nothing left after clamping is dropped.
pub fn process_frame<F, E>(
    frame: &mut Mat,
    face_classifier: &mut F,
    eye_classifier: &mut E,
    config: &DetectionConfig,
    annotate: bool,
) -> Result<FrameReport>
where
    F: Classifier + ?Sized,
    E: Classifier + ?Sized,
{
    let (cols, rows) = (frame.cols(), frame.rows());
    let faces = locator::locate_faces(frame, face_classifier, config)?;

    let mut report = FrameReport::default();
    for face in faces {
        let Some(face) = face.clamp_to(cols, rows) else {
            trace!("Face {:?} lies outside the {}x{} frame", face, cols, rows);
            continue;
        };
        let face_image = helpers::compute_roi(frame, &face.to_cv())?;
        let eyes = locator::locate_eyes(&face_image, eye_classifier)?;
        report.detections.push(FaceDetection { face, eyes });
    }

    if annotate {
        let faces: Vec<FaceRegion> = report.detections.iter().map(|d| d.face).collect();
        locator::mark_faces(frame, &faces)?;
        locator::mark_eyes(
            frame,
            report.detections.iter().flat_map(|d| d.eyes_in_frame()),
        )?;
    }
    Ok(report)
}
