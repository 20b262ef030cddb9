//! Disk scene shared by the frontends.
//!
//! Static disks sit on a Fibonacci sphere around the origin. Moving disks
//! start on a wider sphere and glide toward the origin once the tracking
//! sequence is running, each after its own staggered delay.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::sequence::SequencePhase;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    pub rotation: Quat,
    pub color_rgb: [f32; 3],
}

impl SceneObject {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovingDisk {
    pub object: SceneObject,
    pub direction: Vec3,
    pub speed: f32,
    pub delay: Duration,
    pub stopped: bool,
}

/// Point `i` of `n` spread evenly over a sphere using the golden angle.
pub fn fibonacci_sphere_point(i: usize, n: usize, radius: f32) -> Vec3 {
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let theta = i as f32 * 2.0 * PI / golden_ratio;
    let phi = (1.0 - 2.0 * (i as f32 + 0.5) / n.max(1) as f32).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

fn random_object(rng: &mut StdRng, position: Vec3) -> SceneObject {
    let color_rgb = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()];
    let rx = rng.gen::<f32>() * PI;
    let ry = rng.gen::<f32>() * PI;
    SceneObject {
        position,
        rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, 0.0),
        color_rgb,
    }
}

pub struct DiskField {
    pub static_disks: Vec<SceneObject>,
    pub moving_disks: Vec<MovingDisk>,
}

impl DiskField {
    pub fn new(config: &SceneConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let static_disks = (0..config.static_disks)
            .map(|i| {
                let pos = fibonacci_sphere_point(i, config.static_disks, STATIC_DISK_RADIUS);
                random_object(&mut rng, pos)
            })
            .collect::<Vec<_>>();
        let moving_disks = (0..config.moving_disks)
            .map(|i| {
                let pos = fibonacci_sphere_point(i, config.moving_disks, MOVING_DISK_RADIUS);
                let object = random_object(&mut rng, pos);
                MovingDisk {
                    direction: (-pos).normalize_or_zero(),
                    speed: DISK_SPEED_MIN + rng.gen::<f32>() * DISK_SPEED_SPAN,
                    delay: Duration::from_secs_f32(i as f32 * DISK_START_STAGGER_SEC),
                    stopped: false,
                    object,
                }
            })
            .collect::<Vec<_>>();
        Self {
            static_disks,
            moving_disks,
        }
    }

    /// Advance moving disks by `dt`. Nothing moves unless the sequence is
    /// running; returns how many disks moved this tick.
    pub fn advance(&mut self, phase: SequencePhase, now: Duration, dt: Duration) -> usize {
        let Some(elapsed) = phase.elapsed(now) else {
            return 0;
        };
        let dt_sec = dt.as_secs_f32();
        let mut moved = 0;
        for disk in self.moving_disks.iter_mut() {
            if disk.stopped || elapsed < disk.delay {
                continue;
            }
            // never step past the stop sphere, however long the frame
            let to_stop = disk.object.position.length() - DISK_STOP_RADIUS;
            let step = disk.speed * dt_sec;
            moved += 1;
            if step > to_stop {
                let landing = (to_stop + DISK_STOP_MARGIN).max(0.0);
                disk.object.position += disk.direction * landing;
                disk.stopped = true;
                log::debug!("[scene] disk stopped at {:?}", disk.object.position);
            } else {
                disk.object.position += disk.direction * step;
            }
        }
        moved
    }

    pub fn all_stopped(&self) -> bool {
        self.moving_disks.iter().all(|d| d.stopped)
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.static_disks
            .iter()
            .chain(self.moving_disks.iter().map(|d| &d.object))
    }
}

impl Default for DiskField {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

/// Line segments of a square reference grid in the XZ plane at height `y`.
pub fn grid_lines(size: f32, divisions: usize, y: f32) -> Vec<[Vec3; 2]> {
    let half = size * 0.5;
    let step = size / divisions.max(1) as f32;
    let mut lines = Vec::with_capacity((divisions + 1) * 2);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        lines.push([Vec3::new(k, y, -half), Vec3::new(k, y, half)]);
        lines.push([Vec3::new(-half, y, k), Vec3::new(half, y, k)]);
    }
    lines
}
