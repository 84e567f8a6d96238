use log::warn;
use opencv::{highgui, prelude::*};

use crate::error::Result;

pub trait Viewer {
    fn show(&mut self, window: &str, frame: &Mat) -> Result<()>;

    /// Waits up to `delay_ms` (0 blocks) and returns the raw key code, -1 on timeout.
    fn wait_key(&mut self, delay_ms: i32) -> Result<i32>;

    fn close_all(&mut self) -> Result<()>;
}

/// OpenCV highgui windows.
#[derive(Debug, Default)]
pub struct HighGui;

impl Viewer for HighGui {
    fn show(&mut self, window: &str, frame: &Mat) -> Result<()> {
        highgui::imshow(window, frame)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> Result<i32> {
        Ok(highgui::wait_key(delay_ms)?)
    }

    fn close_all(&mut self) -> Result<()> {
        highgui::destroy_all_windows()?;
        Ok(())
    }
}

/// Closes every window of the wrapped viewer when dropped.
pub struct WindowGuard<'a, V: Viewer + ?Sized> {
    viewer: &'a mut V,
}

impl<'a, V: Viewer + ?Sized> WindowGuard<'a, V> {
    pub fn new(viewer: &'a mut V) -> Self {
        Self { viewer }
    }

    pub fn viewer(&mut self) -> &mut V {
        &mut *self.viewer
    }
}

impl<V: Viewer + ?Sized> Drop for WindowGuard<'_, V> {
    fn drop(&mut self) {
        if let Err(err) = self.viewer.close_all() {
            warn!("Failed to close windows: {}", err);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records shown windows and replays scripted key codes (-1 once exhausted).
    #[derive(Default)]
    pub struct RecordingViewer {
        pub shown: Vec<String>,
        pub keys: Vec<i32>,
        pub waits: Vec<i32>,
        pub closed: usize,
    }

    impl Viewer for RecordingViewer {
        fn show(&mut self, window: &str, _frame: &Mat) -> Result<()> {
            self.shown.push(window.to_owned());
            Ok(())
        }

        fn wait_key(&mut self, delay_ms: i32) -> Result<i32> {
            self.waits.push(delay_ms);
            Ok(if self.keys.is_empty() {
                -1
            } else {
                self.keys.remove(0)
            })
        }

        fn close_all(&mut self) -> Result<()> {
            self.closed += 1;
            Ok(())
        }
    }

    #[test]
    fn guard_closes_windows() {
        let mut viewer = RecordingViewer::default();
        {
            let mut guard = WindowGuard::new(&mut viewer);
            guard.viewer().show("Camera", &Mat::default()).unwrap();
        }
        assert_eq!(viewer.shown, vec!["Camera".to_owned()]);
        assert_eq!(viewer.closed, 1);
    }
}
