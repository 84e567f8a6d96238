use std::path::{Path, PathBuf};

use log::{debug, trace};
use opencv::{
    core::{self, Vector},
    objdetect::{self, CascadeClassifier},
    prelude::*,
};

use crate::config::DetectionConfig;
use crate::error::{DetectionError, Result};
use crate::region::{EyeRegion, FaceRegion, Region};
use crate::utils::constants::{K_CYAN, K_EYE_MIN_NEIGHBORS, K_EYE_SCALE_FACTOR, K_GREEN};
use crate::utils::helpers;

/// Multi-scale window matcher over a single channel image.
pub trait Classifier {
    fn detect(
        &mut self,
        gray: &Mat,
        scale_factor: f64,
        min_neighbors: i32,
    ) -> Result<Vec<core::Rect>>;
}

/// Haar cascade loaded from an OpenCV XML model.
pub struct CascadeModel {
    inner: CascadeClassifier,
    path: PathBuf,
}

impl CascadeModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let load_error = || DetectionError::ClassifierLoad { path: path.clone() };

        let name = path.to_str().ok_or_else(load_error)?;
        let inner = CascadeClassifier::new(name).map_err(|err| {
            debug!("OpenCV rejected {:?}: {}", path, err);
            load_error()
        })?;
        // A missing file gives an empty classifier rather than an error.
        if inner.empty()? {
            return Err(load_error());
        }
        debug!("Loaded cascade {:?}", path);
        Ok(Self { inner, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Classifier for CascadeModel {
    fn detect(
        &mut self,
        gray: &Mat,
        scale_factor: f64,
        min_neighbors: i32,
    ) -> Result<Vec<core::Rect>> {
        let mut found = Vector::<core::Rect>::new();
        self.inner.detect_multi_scale(
            gray,
            &mut found,
            scale_factor,
            min_neighbors,
            objdetect::CASCADE_SCALE_IMAGE,
            core::Size::new(0, 0),
            core::Size::new(0, 0),
        )?;
        Ok(found.to_vec())
    }
}

fn sanitize<S>(raw: Vec<core::Rect>) -> Vec<Region<S>> {
    raw.into_iter()
        .filter_map(|rect| {
            let region = Region::from_detection(rect);
            if region.is_none() {
                trace!("Dropping degenerate detection {:?}", rect);
            }
            region
        })
        .collect()
}

/// Faces in `frame`, in frame coordinates.
pub fn locate_faces<C: Classifier + ?Sized>(
    frame: &Mat,
    classifier: &mut C,
    config: &DetectionConfig,
) -> Result<Vec<FaceRegion>> {
    if frame.empty() {
        return Ok(Vec::new());
    }
    let gray = helpers::to_luminance(frame)?;
    // DetectionConfig guarantees the neighbor count fits an i32.
    let min_neighbors = i32::try_from(config.min_neighbors).unwrap_or(i32::MAX);
    let raw = classifier.detect(&gray, config.scale_factor, min_neighbors)?;
    Ok(sanitize(raw))
}

/// Eyes in `face_image`, relative to that image.
pub fn locate_eyes<C: Classifier + ?Sized>(
    face_image: &Mat,
    classifier: &mut C,
) -> Result<Vec<EyeRegion>> {
    if face_image.empty() {
        return Ok(Vec::new());
    }
    let gray = helpers::to_luminance(face_image)?;
    let raw = classifier.detect(&gray, K_EYE_SCALE_FACTOR, K_EYE_MIN_NEIGHBORS)?;
    Ok(sanitize(raw))
}

pub fn mark_faces(frame: &mut Mat, faces: &[FaceRegion]) -> Result<()> {
    helpers::draw_rects(frame, faces.iter().map(Region::to_cv), K_GREEN)?;
    Ok(())
}

/// Outlines eyes already translated into frame coordinates.
pub fn mark_eyes<I>(frame: &mut Mat, eyes: I) -> Result<()>
where
    I: IntoIterator<Item = FaceRegion>,
{
    helpers::draw_rects(frame, eyes.into_iter().map(|eye| eye.to_cv()), K_CYAN)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of rectangles and records the calls it got.
    #[derive(Default)]
    pub struct ScriptedClassifier {
        pub rects: Vec<core::Rect>,
        pub calls: Vec<(i32, i32, f64, i32)>,
    }

    impl ScriptedClassifier {
        pub fn new(rects: Vec<core::Rect>) -> Self {
            Self {
                rects,
                calls: Vec::new(),
            }
        }
    }

    impl Classifier for ScriptedClassifier {
        fn detect(
            &mut self,
            gray: &Mat,
            scale_factor: f64,
            min_neighbors: i32,
        ) -> Result<Vec<core::Rect>> {
            assert_eq!(gray.channels(), 1, "classifiers must receive luminance");
            self.calls
                .push((gray.cols(), gray.rows(), scale_factor, min_neighbors));
            Ok(self.rects.clone())
        }
    }

    pub fn color_frame(rows: i32, cols: i32) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC3, core::Scalar::all(40.)).unwrap()
    }

    #[test]
    fn face_locator_forwards_config_and_drops_degenerate() {
        let mut classifier = ScriptedClassifier::new(vec![
            core::Rect::new(10, 10, 50, 50),
            core::Rect::new(-5, 10, 50, 50),
            core::Rect::new(10, 10, 0, 50),
        ]);
        let config = DetectionConfig::new(1.25, 4).unwrap();
        let faces = locate_faces(&color_frame(120, 160), &mut classifier, &config).unwrap();

        assert_eq!(faces, vec![FaceRegion::new(10, 10, 50, 50)]);
        assert_eq!(classifier.calls, vec![(160, 120, 1.25, 4)]);
        for face in &faces {
            assert!(face.x >= 0 && face.y >= 0 && face.width > 0 && face.height > 0);
        }
    }

    #[test]
    fn eye_locator_uses_library_defaults() {
        let mut classifier = ScriptedClassifier::new(vec![core::Rect::new(4, 6, 10, 8)]);
        let eyes = locate_eyes(&color_frame(40, 30), &mut classifier).unwrap();

        assert_eq!(eyes, vec![EyeRegion::new(4, 6, 10, 8)]);
        assert_eq!(
            classifier.calls,
            vec![(30, 40, K_EYE_SCALE_FACTOR, K_EYE_MIN_NEIGHBORS)]
        );
    }

    #[test]
    fn no_detections_is_empty_not_error() {
        let mut classifier = ScriptedClassifier::default();
        let faces =
            locate_faces(&color_frame(20, 20), &mut classifier, &DetectionConfig::default()).unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn empty_frame_skips_classifier() {
        let mut classifier = ScriptedClassifier::new(vec![core::Rect::new(0, 0, 5, 5)]);
        let eyes = locate_eyes(&Mat::default(), &mut classifier).unwrap();
        assert!(eyes.is_empty());
        assert!(classifier.calls.is_empty());
    }

    #[test]
    fn missing_cascade_fails_fast() {
        match CascadeModel::load("/nonexistent/haarcascade_eye.xml") {
            Err(DetectionError::ClassifierLoad { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/haarcascade_eye.xml"))
            }
            other => panic!("expected ClassifierLoad, got {:?}", other.err()),
        }
    }

    #[test]
    fn eyes_are_drawn_at_frame_position() {
        let mut frame = color_frame(100, 100);
        let face = FaceRegion::new(40, 30, 40, 40);
        let eye = EyeRegion::new(5, 5, 10, 10);
        mark_eyes(&mut frame, [eye.to_frame(&face)]).unwrap();

        let corner = frame.at_2d::<core::Vec3b>(35, 45).unwrap().0;
        assert_eq!(corner, [255, 255, 0]);
        let crop_origin = frame.at_2d::<core::Vec3b>(5, 5).unwrap().0;
        assert_eq!(crop_origin, [40, 40, 40]);
    }
}
