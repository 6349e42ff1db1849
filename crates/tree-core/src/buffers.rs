//! GPU-facing per-frame buffers.
//!
//! Sized once when the scene is built and overwritten in place every frame;
//! the renderer uploads the slices as-is.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl PointInstance {
    #[inline]
    pub fn new(position: Vec3, size: f32, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            size,
            color: [color.x, color.y, color.z, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub material: f32,
}

impl Default for MeshInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 3],
            material: 0.0,
        }
    }
}

impl MeshInstance {
    #[inline]
    pub fn new(model: Mat4, color: Vec3, material: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
            material,
        }
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

/// Scalar uniforms handed to a population's shader program.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub progress: f32,
}

/// Fixed-size arena of everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameBuffers {
    pub foliage: Vec<PointInstance>,
    pub baubles: Vec<MeshInstance>,
    pub gift_boxes: Vec<MeshInstance>,
    pub photo_cards: Vec<MeshInstance>,
    /// World-space, drawn without the tree group transform.
    pub stars: Vec<PointInstance>,
    pub foliage_uniforms: FrameUniforms,
    pub ornament_uniforms: FrameUniforms,
}

impl FrameBuffers {
    pub fn with_counts(
        foliage: usize,
        baubles: usize,
        gift_boxes: usize,
        photo_cards: usize,
        stars: usize,
    ) -> Self {
        Self {
            foliage: vec![PointInstance::default(); foliage],
            baubles: vec![MeshInstance::default(); baubles],
            gift_boxes: vec![MeshInstance::default(); gift_boxes],
            photo_cards: vec![MeshInstance::default(); photo_cards],
            stars: vec![PointInstance::default(); stars],
            foliage_uniforms: FrameUniforms::default(),
            ornament_uniforms: FrameUniforms::default(),
        }
    }
}
