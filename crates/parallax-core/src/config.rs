//! Tunable parameter groups.
//!
//! Every field defaults to the matching value in [`crate::constants`]; the
//! frontends build a [`ParallaxConfig::default()`] and override what they
//! need before handing it to the estimator and camera.

use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("smoothing alpha must be in (0, 1], got {0}")]
    Alpha(f32),
    #[error("movement threshold must be finite and >= 0, got {0}")]
    Threshold(f32),
    #[error("{name} must be finite and > 0, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("near plane ({near}) must be closer than far plane ({far})")]
    ClipPlanes { near: f32, far: f32 },
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    Fov(f32),
    #[error("distance scale range is empty: [{min}, {max}]")]
    ScaleRange { min: f32, max: f32 },
    #[error("iris landmark set is empty")]
    NoIrisLandmarks,
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GazeConfig {
    pub smoothing_alpha: f32,
    pub movement_threshold: f32,
    pub iris_diameter_mm: f32,
    pub normalized_focal_x: f32,
    pub default_distance_cm: f32,
    /// Flip landmark x (`1 - x`) for detectors running in selfie mode.
    pub mirror_x: bool,
    pub iris_landmarks: Vec<usize>,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: SMOOTHING_ALPHA,
            movement_threshold: MOVEMENT_THRESHOLD,
            iris_diameter_mm: IRIS_DIAMETER_MM,
            normalized_focal_x: NORMALIZED_FOCAL_X,
            default_distance_cm: DEFAULT_DISTANCE_CM,
            mirror_x: false,
            iris_landmarks: LEFT_IRIS_LANDMARKS.to_vec(),
        }
    }
}

impl GazeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::Alpha(self.smoothing_alpha));
        }
        if !(self.movement_threshold.is_finite() && self.movement_threshold >= 0.0) {
            return Err(ConfigError::Threshold(self.movement_threshold));
        }
        positive("iris_diameter_mm", self.iris_diameter_mm)?;
        positive("normalized_focal_x", self.normalized_focal_x)?;
        positive("default_distance_cm", self.default_distance_cm)?;
        if self.iris_landmarks.is_empty() {
            return Err(ConfigError::NoIrisLandmarks);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub nominal_z: f32,
    pub vertical_offset: f32,
    pub frustum_damping: f32,
    pub reference_distance_cm: f32,
    pub scale_span_cm: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            nominal_z: CAMERA_Z,
            vertical_offset: VERTICAL_OFFSET,
            frustum_damping: FRUSTUM_DAMPING,
            reference_distance_cm: DEFAULT_DISTANCE_CM,
            scale_span_cm: DISTANCE_SCALE_SPAN_CM,
            scale_min: DISTANCE_SCALE_MIN,
            scale_max: DISTANCE_SCALE_MAX,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::Fov(self.fov_deg));
        }
        positive("near", self.near)?;
        positive("far", self.far)?;
        if self.near >= self.far {
            return Err(ConfigError::ClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        positive("nominal_z", self.nominal_z)?;
        positive("scale_span_cm", self.scale_span_cm)?;
        positive("scale_min", self.scale_min)?;
        if self.scale_min > self.scale_max {
            return Err(ConfigError::ScaleRange {
                min: self.scale_min,
                max: self.scale_max,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_deg.to_radians()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub static_disks: usize,
    pub moving_disks: usize,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            static_disks: STATIC_DISK_COUNT,
            moving_disks: MOVING_DISK_COUNT,
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallaxConfig {
    pub gaze: GazeConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl ParallaxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gaze.validate()?;
        self.camera.validate()
    }
}
