use instant::Instant;
use std::time::Duration;

/// Monotonic frame clock: time since start plus the delta since last tick.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Returns `(elapsed_since_start, dt)`.
    pub fn tick(&mut self) -> (Duration, Duration) {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        (now - self.start, dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
