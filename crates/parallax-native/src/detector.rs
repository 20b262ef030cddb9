//! Stand-in for the face-mesh detector.
//!
//! The pointer plays the viewer's eye: its position inside the window sets
//! the iris centre in a virtual webcam frame, the scroll wheel changes the
//! apparent iris width (and so the estimated distance), and `F` or leaving
//! the window reports "no face". Frames are published on their own thread at
//! webcam rate, independent of the display refresh.

use parallax_core::{LandmarkFrame, LandmarkPoint, SharedGaze, LEFT_IRIS_LANDMARKS};
use rand::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const FRAME_WIDTH: u32 = 640;
pub const FRAME_HEIGHT: u32 = 480;
const FACE_POINTS: usize = 478;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const IRIS_PX_DEFAULT: f32 = 16.0;
const IRIS_PX_MIN: f32 = 4.0;
const IRIS_PX_MAX: f32 = 60.0;
const JITTER_PX: f32 = 0.6; // detector noise, below the smoothing dead-zone

#[derive(Clone, Copy, Debug)]
pub struct SimulatedViewer {
    /// Pointer position in window uv, (0, 0) top-left.
    pub uv: [f32; 2],
    pub iris_px: f32,
    pub present: bool,
    pub hidden: bool,
}

impl Default for SimulatedViewer {
    fn default() -> Self {
        Self {
            uv: [0.5, 0.5],
            iris_px: IRIS_PX_DEFAULT,
            present: false,
            hidden: false,
        }
    }
}

impl SimulatedViewer {
    pub fn scroll(&mut self, lines: f32) {
        self.iris_px = (self.iris_px + lines).clamp(IRIS_PX_MIN, IRIS_PX_MAX);
    }

    pub fn toggle_hidden(&mut self) {
        self.hidden = !self.hidden;
    }

    fn visible(&self) -> bool {
        self.present && !self.hidden
    }
}

/// Iris ring around `center` (frame pixels) in an otherwise neutral face.
pub fn synthetic_face(center: [f32; 2], iris_px: f32, rng: &mut impl Rng) -> Vec<LandmarkPoint> {
    let (w, h) = (FRAME_WIDTH as f32, FRAME_HEIGHT as f32);
    let mut face = vec![LandmarkPoint::new(0.5, 0.5); FACE_POINTS];
    let r = iris_px * 0.5;
    let ring = [(r, 0.0), (0.0, -r), (-r, 0.0), (0.0, r)];
    for (&index, (dx, dy)) in LEFT_IRIS_LANDMARKS.iter().zip(ring) {
        let jx = rng.gen_range(-JITTER_PX..=JITTER_PX);
        let jy = rng.gen_range(-JITTER_PX..=JITTER_PX);
        face[index] = LandmarkPoint::new(
            (center[0] + dx + jx) / w,
            (center[1] + dy + jy) / h,
        );
    }
    face
}

pub struct DetectorHandle {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl DetectorHandle {
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(t) = self.thread.take() {
            if t.join().is_err() {
                log::warn!("[detector] thread panicked");
            }
        }
    }
}

impl Drop for DetectorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn spawn(
    viewer: Arc<Mutex<SimulatedViewer>>,
    gaze: SharedGaze,
) -> anyhow::Result<DetectorHandle> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    let thread = thread::Builder::new()
        .name("simulated-detector".into())
        .spawn(move || {
            let mut rng = StdRng::seed_from_u64(7);
            let mut frames = 0u64;
            while !stop_flag.load(Ordering::SeqCst) {
                let v = *viewer.lock().unwrap_or_else(|p| p.into_inner());
                let frame = if v.visible() {
                    // the webcam sees a mirror image of the viewer
                    let center = [
                        (1.0 - v.uv[0]) * FRAME_WIDTH as f32,
                        v.uv[1] * FRAME_HEIGHT as f32,
                    ];
                    LandmarkFrame::single(
                        FRAME_WIDTH,
                        FRAME_HEIGHT,
                        synthetic_face(center, v.iris_px, &mut rng),
                    )
                } else {
                    LandmarkFrame::no_face(FRAME_WIDTH, FRAME_HEIGHT)
                };
                if let Err(e) = gaze.observe(&frame) {
                    log::warn!("[detector] rejected frame: {e}");
                }
                frames += 1;
                if frames % 300 == 0 {
                    let s = gaze.snapshot();
                    log::info!(
                        "[detector] {frames} frames; eye ({:.2}, {:.2}) at {:.1}cm",
                        s.smoothed_position.x,
                        s.smoothed_position.y,
                        s.estimated_distance_cm
                    );
                }
                thread::sleep(FRAME_INTERVAL);
            }
        })?;
    Ok(DetectorHandle {
        stop,
        thread: Some(thread),
    })
}
