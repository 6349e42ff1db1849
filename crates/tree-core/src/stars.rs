//! Background star field.
//!
//! Stars sit in a thick shell far outside the tree. They take no part in the
//! morph and are not rotated with the tree group; only their size twinkles.

use crate::constants::*;
use crate::distribution::sample_sphere_surface;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct StarParams {
    pub count: usize,
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness.
    pub depth: f32,
    pub size_factor: f32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            radius: STAR_RADIUS,
            depth: STAR_DEPTH,
            size_factor: STAR_SIZE_FACTOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Base size in world units.
    pub size: f32,
    pub phase: f32,
}

#[derive(Clone, Debug, Default)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Walk inwards from the outer edge of the shell, one random step of at
    /// most `depth / count` per star.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &StarParams) -> Self {
        let step = if params.count == 0 {
            0.0
        } else {
            params.depth / params.count as f32
        };
        let mut r = params.radius + params.depth;
        let stars = (0..params.count)
            .map(|_| {
                r -= step * rng.gen::<f32>();
                Star {
                    position: sample_sphere_surface(rng, r),
                    size: params.size_factor * (0.5 + 0.5 * rng.gen::<f32>()) * STAR_POINT_SCALE,
                    phase: rng.gen::<f32>() * TAU,
                }
            })
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

#[inline]
pub fn star_point_size(star: &Star, time: f32) -> f32 {
    star.size * (1.0 + STAR_TWINKLE * (time + star.phase).sin())
}

/// Linear grey shared by every star.
#[inline]
pub fn star_color() -> Vec3 {
    Vec3::splat(srgb_to_linear(STAR_BRIGHTNESS))
}
