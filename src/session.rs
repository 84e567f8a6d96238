use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use opencv::{imgcodecs, prelude::*};

use crate::capture::{CaptureGuard, FrameSource};
use crate::config::DetectionConfig;
use crate::display::{Viewer, WindowGuard};
use crate::error::{DetectionError, Result};
use crate::locator::Classifier;
use crate::pipeline::{self, FrameReport};
use crate::utils::constants::{K_CAMERA_POLL_MS, K_CAMERA_WINDOW, K_IMAGE_WINDOW};
use crate::utils::helpers::is_key_press;

/// Both cascades plus the settings every frame is processed with.
pub struct Session<F, E> {
    face_classifier: F,
    eye_classifier: E,
    config: DetectionConfig,
    annotate: bool,
}

impl<F: Classifier, E: Classifier> Session<F, E> {
    pub fn new(face_classifier: F, eye_classifier: E, config: DetectionConfig, annotate: bool) -> Self {
        Self {
            face_classifier,
            eye_classifier,
            config,
            annotate,
        }
    }

    pub fn process(&mut self, frame: &mut Mat) -> Result<FrameReport> {
        pipeline::process_frame(
            frame,
            &mut self.face_classifier,
            &mut self.eye_classifier,
            &self.config,
            self.annotate,
        )
    }

    /// Detects on one image file, shows it and blocks until a key press.
    pub fn run_still_image<V: Viewer + ?Sized>(
        &mut self,
        path: &Path,
        viewer: &mut V,
    ) -> Result<FrameReport> {
        let mut image = read_image(path)?;
        debug!("Read {:?} ({}x{})", path, image.cols(), image.rows());

        let report = self.process(&mut image)?;
        print_counts(&report)?;
        println!();

        let mut windows = WindowGuard::new(viewer);
        windows.viewer().show(K_IMAGE_WINDOW, &image)?;
        windows.viewer().wait_key(0)?;
        Ok(report)
    }

    /// Detects on camera frames until a key press or a failed read.
    ///
    /// The source is released on every way out of the loop. Returns the
    /// number of frames processed.
    pub fn run_camera<S: FrameSource, V: Viewer + ?Sized>(
        &mut self,
        source: S,
        viewer: &mut V,
    ) -> Result<usize> {
        let mut source = CaptureGuard::new(source);
        let mut windows = WindowGuard::new(viewer);
        let mut frame = Mat::default();
        let mut frames = 0;

        loop {
            if !source.read_frame(&mut frame)? {
                println!();
                return Err(DetectionError::FrameRead);
            }
            frames += 1;

            let report = self.process(&mut frame)?;
            print_counts(&report)?;

            windows.viewer().show(K_CAMERA_WINDOW, &frame)?;
            if is_key_press(windows.viewer().wait_key(K_CAMERA_POLL_MS)?) {
                break;
            }
        }

        println!();
        info!("Stopped after {} frames", frames);
        Ok(frames)
    }
}

fn read_image(path: &Path) -> Result<Mat> {
    let decode_error = || DetectionError::ImageDecode {
        path: path.to_path_buf(),
    };
    let name = path.to_str().ok_or_else(decode_error)?;
    let image = imgcodecs::imread(name, imgcodecs::IMREAD_COLOR).map_err(|err| {
        debug!("imread failed for {:?}: {}", path, err);
        decode_error()
    })?;
    // imread signals unreadable files with an empty matrix
    if image.empty() {
        return Err(decode_error());
    }
    Ok(image)
}

fn print_counts(report: &FrameReport) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "\r{report}")?;
    stdout.flush()?;
    Ok(())
}
