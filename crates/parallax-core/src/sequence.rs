//! One-shot "tracking acquired" latch that gates the disk animation.
//!
//! The perception side reports acquisition and loss; the render side turns an
//! armed latch into a running one on its next tick, stamping the start time.
//! Losing the face always returns to `Idle` so the next acquisition re-arms.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencePhase {
    #[default]
    Idle,
    Armed,
    Running {
        started_at: Duration,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceTransition {
    Armed,
    Started { at: Duration },
    Reset,
}

impl SequencePhase {
    pub fn on_tracking_acquired(&mut self) -> Option<SequenceTransition> {
        match self {
            SequencePhase::Idle => {
                *self = SequencePhase::Armed;
                Some(SequenceTransition::Armed)
            }
            _ => None,
        }
    }

    pub fn on_tracking_lost(&mut self) -> Option<SequenceTransition> {
        match self {
            SequencePhase::Idle => None,
            _ => {
                *self = SequencePhase::Idle;
                Some(SequenceTransition::Reset)
            }
        }
    }

    pub fn on_tick(&mut self, now: Duration) -> Option<SequenceTransition> {
        match self {
            SequencePhase::Armed => {
                *self = SequencePhase::Running { started_at: now };
                Some(SequenceTransition::Started { at: now })
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, SequencePhase::Running { .. })
    }

    /// Time elapsed since the sequence started, if it is running.
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        match self {
            SequencePhase::Running { started_at } => Some(now.saturating_sub(*started_at)),
            _ => None,
        }
    }
}
