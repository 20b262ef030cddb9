//! Gaze estimator: landmark frames in, smoothed eye position and viewer
//! distance out.
//!
//! The estimator owns the only long-lived tracking state, [`GazeState`].
//! Each observation computes a complete successor state and swaps it in, so a
//! reader never sees a half-updated snapshot.

use crate::config::GazeConfig;
use crate::landmarks::{IrisBox, LandmarkError, LandmarkFrame, LandmarkPoint, RawEyeSample};
use crate::sequence::{SequencePhase, SequenceTransition};
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeState {
    /// Latest eye position sample in NDC (x right, y up).
    pub raw_position: Vec2,
    /// Smoothed eye position in NDC; this is what drives the camera.
    pub smoothed_position: Vec2,
    pub estimated_distance_cm: f32,
    pub face_detected: bool,
    pub sequence: SequencePhase,
}

impl GazeState {
    pub fn new(default_distance_cm: f32) -> Self {
        Self {
            raw_position: Vec2::ZERO,
            smoothed_position: Vec2::ZERO,
            estimated_distance_cm: default_distance_cm,
            face_detected: false,
            sequence: SequencePhase::Idle,
        }
    }

    #[inline]
    pub fn has_started_sequence(&self) -> bool {
        self.sequence.is_running()
    }
}

impl Default for GazeState {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_DISTANCE_CM)
    }
}

/// Exponential moving average with a per-axis dead-zone.
///
/// Moves `smoothed` by `alpha` of the way toward `target` when either axis
/// differs by more than `threshold`; otherwise returns `smoothed` unchanged.
#[inline]
pub fn smoothing_step(smoothed: Vec2, target: Vec2, alpha: f32, threshold: f32) -> Vec2 {
    let delta = target - smoothed;
    if delta.x.abs() > threshold || delta.y.abs() > threshold {
        smoothed + delta * alpha
    } else {
        smoothed
    }
}

pub struct GazeEstimator {
    config: GazeConfig,
    state: GazeState,
}

impl GazeEstimator {
    pub fn new(config: GazeConfig) -> Self {
        let state = GazeState::new(config.default_distance_cm);
        Self { config, state }
    }

    #[inline]
    pub fn state(&self) -> GazeState {
        self.state
    }

    /// Feed one detector result. A malformed face is rejected and leaves the
    /// current state untouched.
    pub fn observe(&mut self, frame: &LandmarkFrame) -> Result<GazeState, LandmarkError> {
        let next = match frame.primary_face() {
            Some(face) => {
                let sample = self.measure(face, frame.width, frame.height)?;
                self.tracked(sample)
            }
            None => self.lost(),
        };
        self.state = next;
        Ok(next)
    }

    /// Feed an already-measured iris sample (detectors that report a box).
    pub fn observe_sample(&mut self, sample: RawEyeSample) -> GazeState {
        self.state = self.tracked(sample);
        self.state
    }

    pub fn observe_no_face(&mut self) -> GazeState {
        self.state = self.lost();
        self.state
    }

    /// Render-side half of the sequence latch: an armed latch starts now.
    pub fn latch_sequence(&mut self, now: Duration) -> Option<SequenceTransition> {
        let mut next = self.state;
        let transition = next.sequence.on_tick(now);
        if transition.is_some() {
            log::debug!("[gaze] sequence started at {:.3}s", now.as_secs_f32());
            self.state = next;
        }
        transition
    }

    /// Drop everything, including the smoothed position.
    pub fn reset(&mut self) {
        self.state = GazeState::new(self.config.default_distance_cm);
    }

    pub fn measure(
        &self,
        face: &[LandmarkPoint],
        width: u32,
        height: u32,
    ) -> Result<RawEyeSample, LandmarkError> {
        let iris = IrisBox::from_landmarks(
            face,
            &self.config.iris_landmarks,
            width,
            height,
            self.config.mirror_x,
        )?;
        Ok(RawEyeSample::from_box(&iris, width, height))
    }

    fn tracked(&self, sample: RawEyeSample) -> GazeState {
        let mut next = self.state;
        let target = sample.to_ndc();
        next.raw_position = target;
        next.smoothed_position = smoothing_step(
            self.state.smoothed_position,
            target,
            self.config.smoothing_alpha,
            self.config.movement_threshold,
        );
        match sample.distance_cm(self.config.iris_diameter_mm, self.config.normalized_focal_x) {
            Some(cm) => next.estimated_distance_cm = cm,
            None => log::debug!(
                "[gaze] degenerate iris width {}px; holding {:.1}cm",
                sample.iris_width_px,
                self.state.estimated_distance_cm
            ),
        }
        if !self.state.face_detected {
            log::info!("[gaze] face acquired");
        }
        next.face_detected = true;
        if let Some(SequenceTransition::Armed) = next.sequence.on_tracking_acquired() {
            log::debug!("[gaze] sequence armed");
        }
        next
    }

    fn lost(&self) -> GazeState {
        let mut next = self.state;
        if next.face_detected {
            log::info!("[gaze] face lost");
        }
        next.face_detected = false;
        next.sequence.on_tracking_lost();
        next
    }
}

impl Default for GazeEstimator {
    fn default() -> Self {
        Self::new(GazeConfig::default())
    }
}
