//! Off-axis parallax camera.
//!
//! Every render tick the smoothed eye position is mapped into world space and
//! the viewing frustum is skewed against it, so the screen behaves like a
//! fixed window onto the scene. The mapping is a pure function of the current
//! [`GazeState`] and viewport; nothing is carried between ticks.

use crate::config::CameraConfig;
use crate::gaze::GazeState;
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; zero sizes count as one pixel.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Right-handed perspective projection from explicit near-plane bounds,
/// mapping depth to [0, 1]. Symmetric bounds give `Mat4::perspective_rh`.
pub fn frustum_rh(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let inv_w = 1.0 / (right - left);
    let inv_h = 1.0 / (top - bottom);
    let r = far / (near - far);
    Mat4::from_cols(
        Vec4::new(2.0 * near * inv_w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near * inv_h, 0.0, 0.0),
        Vec4::new((right + left) * inv_w, (top + bottom) * inv_h, r, -1.0),
        Vec4::new(0.0, 0.0, r * near, 0.0),
    )
}

/// Near-plane bounds of a (possibly asymmetric) viewing frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    pub fn symmetric(fovy_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let top = near * (fovy_radians * 0.5).tan();
        let right = top * aspect;
        Self {
            left: -right,
            right,
            bottom: -top,
            top,
            near,
            far,
        }
    }

    pub fn shifted(self, offset: Vec2) -> Self {
        Self {
            left: self.left + offset.x,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
            top: self.top + offset.y,
            ..self
        }
    }

    pub fn projection(&self) -> Mat4 {
        frustum_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// What the renderer consumes each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub frustum: Frustum,
    pub projection: Mat4,
    pub distance_scale: f32,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParallaxCamera {
    config: CameraConfig,
}

impl ParallaxCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Closer than the reference distance shrinks the effect, farther grows
    /// it, within the configured clamp.
    pub fn distance_scale(&self, distance_cm: f32) -> f32 {
        let c = &self.config;
        if !distance_cm.is_finite() {
            return 1.0;
        }
        (1.0 + (distance_cm - c.reference_distance_cm) / c.scale_span_cm)
            .clamp(c.scale_min, c.scale_max)
    }

    /// World-space half extents of the screen at the nominal eye distance.
    pub fn half_extents(&self, aspect: f32) -> Vec2 {
        let half_width = (self.config.fov_radians() * 0.5).tan() * self.config.nominal_z.abs();
        Vec2::new(half_width, half_width / aspect)
    }

    pub fn eye_position(&self, gaze: &GazeState, viewport: Viewport) -> Vec3 {
        let scale = self.distance_scale(gaze.estimated_distance_cm);
        let half = self.half_extents(viewport.aspect());
        let p = gaze.smoothed_position;
        Vec3::new(
            p.x * half.x * scale,
            (p.y * half.y - self.config.vertical_offset) * scale,
            -self.config.nominal_z * scale,
        )
    }

    /// Symmetric frustum skewed by the eye's lateral offset over its depth.
    pub fn frustum(&self, eye: Vec3, aspect: f32) -> Frustum {
        let c = &self.config;
        let base = Frustum::symmetric(c.fov_radians(), aspect, c.near, c.far);
        let depth = eye.z.abs().max(f32::EPSILON);
        let offset = Vec2::new(eye.x, eye.y) / depth * c.near * c.frustum_damping;
        base.shifted(offset)
    }

    #[inline]
    pub fn look_target(&self) -> Vec3 {
        Vec3::new(0.0, -self.config.vertical_offset, 0.0)
    }

    pub fn pose(&self, gaze: &GazeState, viewport: Viewport) -> CameraPose {
        let eye = self.eye_position(gaze, viewport);
        let frustum = self.frustum(eye, viewport.aspect());
        CameraPose {
            position: eye,
            target: self.look_target(),
            up: Vec3::Y,
            frustum,
            projection: frustum.projection(),
            distance_scale: self.distance_scale(gaze.estimated_distance_cm),
        }
    }
}
