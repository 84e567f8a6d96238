//! Detection rectangles tagged with the coordinate space they live in.
//!
//! The face cascade reports rectangles relative to the whole frame, the eye
//! cascade relative to the face crop it scanned. Keeping the space in the
//! type stops a crop-relative eye from being drawn at frame coordinates.

use std::fmt;
use std::marker::PhantomData;

use opencv::core;

/// Coordinates relative to the full frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpace;

/// Coordinates relative to a face crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSpace;

/// Axis-aligned rectangle: `x` is the column, `y` the row.
pub struct Region<S> {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    space: PhantomData<S>,
}

pub type FaceRegion = Region<FrameSpace>;
pub type EyeRegion = Region<FaceSpace>;

impl<S> Region<S> {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            space: PhantomData,
        }
    }

    /// Accepts a raw classifier rectangle only if it has a non-negative
    /// origin and a positive size.
    pub fn from_detection(rect: core::Rect) -> Option<Self> {
        if rect.x < 0 || rect.y < 0 || rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        Some(Self::new(rect.x, rect.y, rect.width, rect.height))
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with a `cols` x `rows` image, `None` when they do not overlap.
    pub fn clamp_to(&self, cols: i32, rows: i32) -> Option<Self> {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let right = self.right().min(cols);
        let bottom = self.bottom().min(rows);
        let clamped = Self::new(x, y, right - x, bottom - y);
        (!clamped.is_empty()).then_some(clamped)
    }

    pub fn lies_within(&self, cols: i32, rows: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= cols && self.bottom() <= rows
    }

    pub fn to_cv(&self) -> core::Rect {
        core::Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl EyeRegion {
    /// Moves an eye found inside `face` into frame coordinates.
    pub fn to_frame(&self, face: &FaceRegion) -> FaceRegion {
        Region::new(face.x + self.x, face.y + self.y, self.width, self.height)
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<S> Clone for Region<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Region<S> {}

impl<S> PartialEq for Region<S> {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y, self.width, self.height) == (other.x, other.y, other.width, other.height)
    }
}

impl<S> Eq for Region<S> {}

impl<S> fmt::Debug for Region<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("space", &std::any::type_name::<S>())
            .finish()
    }
}
