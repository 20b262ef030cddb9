pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod gaze;
pub mod gpu;
pub mod landmarks;
pub mod scene;
pub mod sequence;
pub mod session;
pub mod shared;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use gaze::*;
pub use landmarks::*;
pub use scene::*;
pub use sequence::*;
pub use session::*;
pub use shared::*;
