use std::ops::{Deref, DerefMut};

use log::{debug, warn};
use opencv::{prelude::*, videoio};

use crate::error::{DetectionError, Result};

/// A stream of frames backed by a device that must be released.
pub trait FrameSource {
    /// Fills `frame`, returning `false` when no frame could be grabbed.
    fn read_frame(&mut self, frame: &mut Mat) -> Result<bool>;

    fn release(&mut self) -> Result<()>;
}

pub struct CameraSource {
    capture: videoio::VideoCapture,
}

impl CameraSource {
    pub fn open(index: i32) -> Result<Self> {
        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)?;
        if !videoio::VideoCapture::is_opened(&capture)? {
            return Err(DetectionError::CameraOpen { index });
        }
        debug!("Opened camera #{}", index);
        Ok(Self { capture })
    }
}

impl FrameSource for CameraSource {
    fn read_frame(&mut self, frame: &mut Mat) -> Result<bool> {
        let grabbed = self.capture.read(frame)?;
        Ok(grabbed && !frame.empty())
    }

    fn release(&mut self) -> Result<()> {
        self.capture.release()?;
        Ok(())
    }
}

/// Owns a [`FrameSource`] and releases it exactly once when dropped.
pub struct CaptureGuard<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> CaptureGuard<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: FrameSource> Deref for CaptureGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.source
    }
}

impl<S: FrameSource> DerefMut for CaptureGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: FrameSource> Drop for CaptureGuard<S> {
    fn drop(&mut self) {
        match self.source.release() {
            Ok(()) => debug!("Capture device released"),
            Err(err) => warn!("Failed to release capture device: {}", err),
        }
    }
}
