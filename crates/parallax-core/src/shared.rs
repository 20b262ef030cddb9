//! Cross-thread handle on the gaze estimator.
//!
//! The perception callback and the render loop may run on different threads.
//! Both go through this handle; the estimator swaps whole [`GazeState`]
//! values, so a reader always copies out a consistent snapshot.

use crate::config::GazeConfig;
use crate::gaze::{GazeEstimator, GazeState};
use crate::landmarks::{LandmarkError, LandmarkFrame};
use crate::sequence::SequenceTransition;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Clone)]
pub struct SharedGaze {
    inner: Arc<Mutex<GazeEstimator>>,
}

impl SharedGaze {
    pub fn new(config: GazeConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(GazeEstimator::new(config))),
        }
    }

    // GazeState is plain data and is replaced in one assignment, so a
    // poisoned lock still guards a valid value.
    fn lock(&self) -> MutexGuard<'_, GazeEstimator> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn observe(&self, frame: &LandmarkFrame) -> Result<GazeState, LandmarkError> {
        self.lock().observe(frame)
    }

    pub fn observe_no_face(&self) -> GazeState {
        self.lock().observe_no_face()
    }

    pub fn snapshot(&self) -> GazeState {
        self.lock().state()
    }

    /// Start an armed sequence and return the resulting snapshot.
    pub fn latch_and_snapshot(&self, now: Duration) -> (GazeState, Option<SequenceTransition>) {
        let mut est = self.lock();
        let transition = est.latch_sequence(now);
        (est.state(), transition)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }
}

impl Default for SharedGaze {
    fn default() -> Self {
        Self::new(GazeConfig::default())
    }
}
