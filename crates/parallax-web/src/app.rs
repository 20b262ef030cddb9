use crate::bridge;
use parallax_core::{
    FrameClock, LandmarkFrame, ParallaxConfig, ParallaxSession, RenderFrame, Viewport,
};
use wasm_bindgen::prelude::*;

fn js_error(msg: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&msg.to_string()).into()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("parallax-web loaded");
    Ok(())
}

/// Owned by the page. The face-mesh `onResults` callback feeds
/// `on_landmarks`/`on_no_face`; the animation frame calls `tick` and applies
/// the returned pose and object transforms to its renderer.
#[wasm_bindgen]
pub struct ParallaxApp {
    session: ParallaxSession,
    clock: FrameClock,
    last: Option<RenderFrame>,
}

#[wasm_bindgen]
impl ParallaxApp {
    /// `mirror_x`: flip landmark x here. Pass `false` when the detector
    /// already mirrors its output (face-mesh `selfieMode: true`).
    #[wasm_bindgen(constructor)]
    pub fn new(mirror_x: bool) -> Result<ParallaxApp, JsValue> {
        let mut config = ParallaxConfig::default();
        config.gaze.mirror_x = mirror_x;
        let session = ParallaxSession::new(config).map_err(js_error)?;
        Ok(Self {
            session,
            clock: FrameClock::new(),
            last: None,
        })
    }

    /// One face as interleaved normalized `x, y` pairs from a `width` x
    /// `height` source frame.
    pub fn on_landmarks(&mut self, points: &[f32], width: u32, height: u32) -> Result<(), JsValue> {
        let face = bridge::unpack_face(points).map_err(js_error)?;
        let frame = LandmarkFrame::single(width, height, face);
        self.session.gaze().observe(&frame).map_err(|e| {
            log::warn!("[web] rejected landmarks: {e}");
            js_error(e)
        })?;
        Ok(())
    }

    pub fn on_no_face(&mut self) {
        self.session.gaze().observe_no_face();
    }

    /// Advance one display frame; returns the packed camera pose.
    pub fn tick(&mut self, viewport_width: u32, viewport_height: u32) -> Vec<f32> {
        let (now, dt) = self.clock.tick();
        let frame =
            self.session
                .render_tick(Viewport::new(viewport_width, viewport_height), now, dt);
        let packed = bridge::pack_pose(&frame.pose);
        self.last = Some(frame);
        packed
    }

    /// Packed transforms of every disk, static ones first.
    pub fn objects(&self) -> Vec<f32> {
        bridge::pack_objects(self.session.field())
    }

    pub fn pose_stride() -> usize {
        bridge::POSE_STRIDE
    }

    pub fn object_stride() -> usize {
        bridge::OBJECT_STRIDE
    }

    pub fn face_detected(&self) -> bool {
        self.session.gaze().snapshot().face_detected
    }

    pub fn distance_cm(&self) -> f32 {
        self.session.gaze().snapshot().estimated_distance_cm
    }

    pub fn moved_disks(&self) -> usize {
        self.last.map(|f| f.moved_disks).unwrap_or(0)
    }
}
