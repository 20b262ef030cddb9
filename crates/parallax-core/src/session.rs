//! Single owner for everything a frontend drives per frame.

use crate::camera::{CameraPose, ParallaxCamera, Viewport};
use crate::config::{ConfigError, ParallaxConfig};
use crate::gaze::GazeState;
use crate::scene::DiskField;
use crate::sequence::SequenceTransition;
use crate::shared::SharedGaze;
use std::time::Duration;

/// Everything a renderer needs for one display refresh.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame {
    pub pose: CameraPose,
    pub gaze: GazeState,
    pub moved_disks: usize,
}

pub struct ParallaxSession {
    gaze: SharedGaze,
    camera: ParallaxCamera,
    field: DiskField,
}

impl ParallaxSession {
    pub fn new(config: ParallaxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gaze: SharedGaze::new(config.gaze),
            camera: ParallaxCamera::new(config.camera),
            field: DiskField::new(&config.scene),
        })
    }

    /// Handle for the perception side; clone it into a detector thread.
    pub fn gaze(&self) -> &SharedGaze {
        &self.gaze
    }

    pub fn field(&self) -> &DiskField {
        &self.field
    }

    /// One display refresh at `now` (time since start), `dt` after the last.
    pub fn render_tick(&mut self, viewport: Viewport, now: Duration, dt: Duration) -> RenderFrame {
        let (gaze, transition) = self.gaze.latch_and_snapshot(now);
        if let Some(SequenceTransition::Started { at }) = transition {
            log::info!("[session] disks released at {:.2}s", at.as_secs_f32());
        }
        let moved_disks = self.field.advance(gaze.sequence, now, dt);
        let pose = self.camera.pose(&gaze, viewport);
        RenderFrame {
            pose,
            gaze,
            moved_disks,
        }
    }
}
