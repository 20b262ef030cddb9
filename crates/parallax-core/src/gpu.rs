//! GPU-facing plain-data layouts built from the scene and camera.

use crate::camera::CameraPose;
use crate::constants::{DISK_SIZE, GRID_DIVISIONS, GRID_SIZE, GRID_Y};
use crate::scene::{grid_lines, DiskField};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn from_pose(pose: &CameraPose) -> Self {
        Self {
            view_proj: pose.view_proj().to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DiskInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
}

pub fn disk_instances(field: &DiskField) -> Vec<DiskInstance> {
    let size = Mat4::from_scale(Vec3::splat(DISK_SIZE));
    field
        .objects()
        .map(|o| DiskInstance {
            model: (o.model_matrix() * size).to_cols_array_2d(),
            color: [o.color_rgb[0], o.color_rgb[1], o.color_rgb[2], 1.0],
        })
        .collect()
}

pub fn grid_vertices() -> Vec<LineVertex> {
    grid_lines(GRID_SIZE, GRID_DIVISIONS, GRID_Y)
        .into_iter()
        .flat_map(|[a, b]| [LineVertex { pos: a.to_array() }, LineVertex { pos: b.to_array() }])
        .collect()
}
