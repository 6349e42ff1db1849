//! Point distributions for the two scene states.
//!
//! The chaos state scatters points uniformly through a ball, the formed state
//! places foliage on a noisy cone and ornaments along a spiral wrapped around
//! that cone. All shapes are centered vertically so the tree spans
//! `[-height/2, height/2]`.

use crate::constants::{CONE_NOISE_AMPLITUDE, SPIRAL_RADIUS_OFFSET};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Uniform sample inside a ball of `radius`.
///
/// The polar angle comes from `acos` of a uniform variate and the radius is
/// scaled by a cube root, so density is uniform per unit volume rather than
/// bunching at the center or on the surface.
pub fn sample_sphere_volume<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;
    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Uniform sample on the surface of a sphere of `radius`.
pub fn sample_sphere_surface<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let sin_phi = phi.sin();
    Vec3::new(
        radius * sin_phi * theta.cos(),
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
    )
}

/// Sample on a cone that tapers from `base_radius` at the bottom to a point
/// at the top, with uniform radial jitter of `±CONE_NOISE_AMPLITUDE`.
pub fn sample_cone_surface<R: Rng + ?Sized>(rng: &mut R, height: f32, base_radius: f32) -> Vec3 {
    let y = rng.gen::<f32>() * height;
    let progress = if height > 0.0 { y / height } else { 0.0 };
    let r = base_radius * (1.0 - progress);
    let theta = rng.gen::<f32>() * TAU;
    let noise = (rng.gen::<f32>() - 0.5) * 2.0 * CONE_NOISE_AMPLITUDE;
    Vec3::new(
        (r + noise) * theta.cos(),
        y - height / 2.0,
        (r + noise) * theta.sin(),
    )
}

/// Deterministic helix position for element `index` of `total`.
///
/// Height and azimuth grow linearly with `index / total`, the radius follows
/// the cone taper plus a small outward offset.
pub fn sample_spiral(index: usize, total: usize, height: f32, base_radius: f32, turns: f32) -> Vec3 {
    let progress = if total == 0 {
        0.0
    } else {
        index as f32 / total as f32
    };
    let y = progress * height;
    let r = base_radius * (1.0 - progress) + SPIRAL_RADIUS_OFFSET;
    let angle = progress * 2.0 * PI * turns;
    Vec3::new(r * angle.cos(), y - height / 2.0, r * angle.sin())
}

/// Distance from the vertical axis.
#[inline]
pub fn radial_distance(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}
