//! Detector-facing types and the per-frame iris measurement.
//!
//! The face-mesh detector is an external collaborator. Per video frame it
//! hands us a [`LandmarkFrame`]: the source frame size plus zero or more
//! faces, each a list of normalized (0..1) points. Everything below turns the
//! iris subset of one face into a [`RawEyeSample`] in frame-pixel space.

use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("frame has zero size ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("landmark {index} missing from a face with {len} points")]
    MissingLandmark { index: usize, len: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Normalized point within the source frame, `(0, 0)` top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detector result. An empty `faces` list is the "no face" signal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    pub width: u32,
    pub height: u32,
    pub faces: Vec<Vec<LandmarkPoint>>,
}

impl LandmarkFrame {
    pub fn new(width: u32, height: u32, faces: Vec<Vec<LandmarkPoint>>) -> Self {
        Self {
            width,
            height,
            faces,
        }
    }

    pub fn single(width: u32, height: u32, face: Vec<LandmarkPoint>) -> Self {
        Self::new(width, height, vec![face])
    }

    pub fn no_face(width: u32, height: u32) -> Self {
        Self::new(width, height, Vec::new())
    }

    /// Only one face drives the camera; the detector's first result wins.
    pub fn primary_face(&self) -> Option<&[LandmarkPoint]> {
        self.faces
            .iter()
            .find(|f| !f.is_empty())
            .map(|f| f.as_slice())
    }
}

/// Axis-aligned bounding box of the iris points, in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IrisBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl IrisBox {
    pub fn from_landmarks(
        face: &[LandmarkPoint],
        indices: &[usize],
        width: u32,
        height: u32,
        mirror_x: bool,
    ) -> Result<Self, LandmarkError> {
        if width == 0 || height == 0 {
            return Err(LandmarkError::EmptyFrame { width, height });
        }
        if indices.is_empty() {
            return Err(LandmarkError::MissingLandmark {
                index: 0,
                len: face.len(),
            });
        }
        let (w, h) = (width as f32, height as f32);
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for &index in indices {
            let p = face.get(index).ok_or(LandmarkError::MissingLandmark {
                index,
                len: face.len(),
            })?;
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(LandmarkError::NonFinite { index });
            }
            let x = if mirror_x { 1.0 - p.x } else { p.x };
            let px = Vec2::new(x * w, p.y * h);
            min = min.min(px);
            max = max.max(px);
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Apparent iris diameter in pixels (`dx`).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

/// Per-frame iris measurement. Recomputed every frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawEyeSample {
    pub center: Vec2,
    pub iris_width_px: f32,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl RawEyeSample {
    pub fn from_box(iris: &IrisBox, frame_width: u32, frame_height: u32) -> Self {
        Self {
            center: iris.center(),
            iris_width_px: iris.width(),
            frame_width,
            frame_height,
        }
    }

    /// Frame pixels to NDC: x right, y up, both in [-1, 1].
    pub fn to_ndc(&self) -> Vec2 {
        let w = self.frame_width.max(1) as f32;
        let h = self.frame_height.max(1) as f32;
        Vec2::new(
            (self.center.x / w) * 2.0 - 1.0,
            -((self.center.y / h) * 2.0 - 1.0),
        )
    }

    /// Pinhole estimate of the viewer distance in centimetres.
    ///
    /// Returns `None` when the iris has no apparent width or the result is
    /// not finite; callers hold their previous estimate in that case.
    pub fn distance_cm(&self, iris_diameter_mm: f32, normalized_focal_x: f32) -> Option<f32> {
        let dx = self.iris_width_px;
        if !(dx.is_finite() && dx > 0.0) {
            return None;
        }
        let focal_px = self.frame_width.min(self.frame_height) as f32 * normalized_focal_x;
        let cm = (focal_px * iris_diameter_mm / dx) / 10.0;
        (cm.is_finite() && cm > 0.0).then_some(cm)
    }
}
