//! Per-element, per-frame evaluation of positions, rotations, scales and colors.
//!
//! Everything here is a closed-form function of the element's static
//! attributes, the population progress and elapsed time. Nothing is stored
//! between frames.

use crate::constants::*;
use crate::population::{InstancedElement, OrnamentKind};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// GLSL-style Hermite step between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span.abs() <= f32::EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Eased local progress of one element.
///
/// Higher seeds get a shorter window: they settle first while forming and
/// leave the tree last when scattering. Either way the morph spreads out
/// instead of snapping at once.
#[inline]
pub fn staggered_progress(progress: f32, seed: f32) -> f32 {
    let stagger = seed * STAGGER_SPAN;
    ease_in_out_cubic(smoothstep(0.0, 1.0 - stagger, progress))
}

/// Evaluated foliage point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageSample {
    pub position: Vec3,
    pub color: Vec3,
    pub local: f32,
}

pub fn evaluate_foliage(chaos: Vec3, target: Vec3, seed: f32, progress: f32, time: f32) -> FoliageSample {
    let local = staggered_progress(progress, seed);
    let mut position = chaos.lerp(target, local);

    if progress > FORMED_THRESHOLD {
        let wind = (time * 1.5 + position.y * 0.5).sin() * 0.05;
        position.x += wind * local;
        position.z += (time + position.y).cos() * 0.03 * local;
    }

    FoliageSample {
        position,
        color: foliage_color(position.y, seed, local, time),
        local,
    }
}

/// Height gradient between two emeralds with gold sparkle that only shows up
/// as the tree coheres.
pub fn foliage_color(y: f32, seed: f32, local: f32, time: f32) -> Vec3 {
    let deep = Vec3::from(FOLIAGE_DEEP);
    let light = Vec3::from(FOLIAGE_LIGHT);
    let gold = Vec3::from(FOLIAGE_GOLD);

    let height_factor = ((y + 5.0) / 10.0).clamp(0.0, 1.0);
    let base = deep.lerp(light, height_factor * 0.7);

    let sparkle = (time * 3.0 + seed * 123.0).sin();
    let gold_mix = smoothstep(0.9, 1.0, sparkle) * local;
    base.lerp(gold, gold_mix)
}

/// Rendered point size in world units, larger for higher seeds.
#[inline]
pub fn foliage_point_size(seed: f32) -> f32 {
    (45.0 * seed + 20.0) * FOLIAGE_POINT_SCALE
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
}

impl InstanceTransform {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            euler_xyz(self.rotation),
            self.position,
        )
    }
}

#[inline]
pub fn euler_xyz(r: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

/// Progress window over which each ornament kind travels from chaos to target.
pub fn blend_window(kind: OrnamentKind) -> (f32, f32) {
    match kind {
        OrnamentKind::Bauble => (0.0, 1.0),
        OrnamentKind::GiftBox => (0.2, 1.0),
        OrnamentKind::PhotoCard => (0.1, 0.9),
    }
}

/// Evaluate ornament `index` of a population of `kind`.
pub fn evaluate_ornament(
    kind: OrnamentKind,
    element: &InstancedElement,
    index: usize,
    progress: f32,
    time: f32,
) -> InstanceTransform {
    let (lo, hi) = blend_window(kind);
    let local = smoothstep(lo, hi, progress);
    let position = element.chaos_position.lerp(element.target_position, local);
    let phase = index as f32;

    match kind {
        OrnamentKind::Bauble => bauble(element, position, phase, progress, time),
        OrnamentKind::GiftBox => gift_box(element, position, progress, time),
        OrnamentKind::PhotoCard => photo_card(element, position, phase, progress, time),
    }
}

fn bauble(e: &InstancedElement, mut position: Vec3, phase: f32, progress: f32, t: f32) -> InstanceTransform {
    if progress > FORMED_THRESHOLD {
        position.y += (t * 2.0 + phase).sin() * 0.05;
    }
    let rotation = if progress < CHAOS_THRESHOLD {
        Vec3::new(e.chaos_rotation.x + t, e.chaos_rotation.y + t, e.chaos_rotation.z)
    } else {
        let mut r = e.target_rotation;
        r.y += (t * 0.5 + phase).sin() * 0.2;
        r
    };
    InstanceTransform {
        position,
        rotation,
        scale: e.scale * (0.8 + 0.2 * (t + phase).sin()),
    }
}

fn gift_box(e: &InstancedElement, position: Vec3, progress: f32, t: f32) -> InstanceTransform {
    let mut rotation = e.target_rotation;
    if progress < FORMED_THRESHOLD {
        rotation.x += t;
        rotation.z += t;
    }
    InstanceTransform {
        position,
        rotation,
        scale: e.scale,
    }
}

fn photo_card(e: &InstancedElement, position: Vec3, phase: f32, progress: f32, t: f32) -> InstanceTransform {
    let rotation = if progress < CHAOS_THRESHOLD {
        Vec3::new(
            e.chaos_rotation.x + t * 0.5,
            e.chaos_rotation.y,
            e.chaos_rotation.z + t * 0.3,
        )
    } else {
        let mut r = e.target_rotation;
        r.z += (t * 1.5 + phase).sin() * 0.08;
        r
    };
    InstanceTransform {
        position,
        rotation,
        scale: e.scale,
    }
}
