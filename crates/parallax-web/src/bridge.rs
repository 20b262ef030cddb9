//! Flat-array marshalling between the JS host and the core types.
//!
//! JS hands over landmarks as interleaved `[x0, y0, x1, y1, ...]` and reads
//! poses and scene objects back as fixed-stride `Float32Array`s.

use parallax_core::{CameraPose, DiskField, LandmarkPoint};
use thiserror::Error;

/// position(3) + target(3) + projection(16, column-major) + frustum(6)
pub const POSE_STRIDE: usize = 28;
/// position(3) + rotation quaternion xyzw(4) + colour rgb(3)
pub const OBJECT_STRIDE: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("landmark array has odd length {0}; expected interleaved x,y pairs")]
    OddLength(usize),
}

pub fn unpack_face(points: &[f32]) -> Result<Vec<LandmarkPoint>, BridgeError> {
    if points.len() % 2 != 0 {
        return Err(BridgeError::OddLength(points.len()));
    }
    Ok(points
        .chunks_exact(2)
        .map(|xy| LandmarkPoint::new(xy[0], xy[1]))
        .collect())
}

pub fn pack_pose(pose: &CameraPose) -> Vec<f32> {
    let f = &pose.frustum;
    let mut out = Vec::with_capacity(POSE_STRIDE);
    out.extend_from_slice(&pose.position.to_array());
    out.extend_from_slice(&pose.target.to_array());
    out.extend_from_slice(&pose.projection.to_cols_array());
    out.extend_from_slice(&[f.left, f.right, f.bottom, f.top, f.near, f.far]);
    out
}

pub fn pack_objects(field: &DiskField) -> Vec<f32> {
    let mut out = Vec::with_capacity(field.objects().count() * OBJECT_STRIDE);
    for o in field.objects() {
        out.extend_from_slice(&o.position.to_array());
        out.extend_from_slice(&o.rotation.to_array());
        out.extend_from_slice(&o.color_rgb);
    }
    out
}
