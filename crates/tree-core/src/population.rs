//! Static per-element attributes for every particle/instance population.
//!
//! Populations are generated once, never resized, and read every frame by the
//! transform evaluator. Index `i` always refers to the same element across all
//! attribute arrays.

use crate::constants::*;
use crate::distribution::{sample_cone_surface, sample_sphere_volume, sample_spiral};
use crate::error::SceneError;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Derive an independent RNG stream from a base seed.
pub fn population_rng(seed: u64, stream: u64) -> StdRng {
    let mix = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

#[derive(Clone, Debug)]
pub struct FoliageParams {
    pub count: usize,
    pub height: f32,
    pub radius: f32,
    pub chaos_radius: f32,
}

impl Default for FoliageParams {
    fn default() -> Self {
        Self {
            count: FOLIAGE_COUNT,
            height: TREE_HEIGHT,
            radius: TREE_RADIUS,
            chaos_radius: FOLIAGE_CHAOS_RADIUS,
        }
    }
}

/// Foliage point cloud stored as parallel arrays.
#[derive(Clone, Debug)]
pub struct FoliagePopulation {
    chaos: Vec<Vec3>,
    target: Vec<Vec3>,
    seeds: Vec<f32>,
}

impl FoliagePopulation {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &FoliageParams) -> Self {
        let mut chaos = Vec::with_capacity(params.count);
        let mut target = Vec::with_capacity(params.count);
        let mut seeds = Vec::with_capacity(params.count);
        for _ in 0..params.count {
            chaos.push(sample_sphere_volume(rng, params.chaos_radius));
            target.push(sample_cone_surface(rng, params.height, params.radius));
            seeds.push(rng.gen::<f32>());
        }
        Self {
            chaos,
            target,
            seeds,
        }
    }

    /// Assemble a population from precomputed arrays.
    pub fn from_parts(
        chaos: Vec<Vec3>,
        target: Vec<Vec3>,
        seeds: Vec<f32>,
    ) -> Result<Self, SceneError> {
        if chaos.len() != target.len() || chaos.len() != seeds.len() {
            return Err(SceneError::PopulationMismatch {
                what: "foliage",
                chaos: chaos.len(),
                target: target.len(),
                seeds: seeds.len(),
            });
        }
        Ok(Self {
            chaos,
            target,
            seeds,
        })
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn chaos(&self) -> &[Vec3] {
        &self.chaos
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    pub fn seeds(&self) -> &[f32] {
        &self.seeds
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrnamentKind {
    Bauble,
    GiftBox,
    PhotoCard,
}

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 3] = [
        OrnamentKind::Bauble,
        OrnamentKind::GiftBox,
        OrnamentKind::PhotoCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrnamentKind::Bauble => "bauble",
            OrnamentKind::GiftBox => "gift-box",
            OrnamentKind::PhotoCard => "photo-card",
        }
    }

    /// Shader material id carried per instance.
    pub fn material_id(&self) -> f32 {
        match self {
            OrnamentKind::Bauble => 0.0,
            OrnamentKind::GiftBox => 1.0,
            OrnamentKind::PhotoCard => 2.0,
        }
    }

    pub fn default_count(&self) -> usize {
        match self {
            OrnamentKind::Bauble => BAUBLE_COUNT,
            OrnamentKind::GiftBox => GIFT_COUNT,
            OrnamentKind::PhotoCard => PHOTO_COUNT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrnamentParams {
    pub kind: OrnamentKind,
    pub count: usize,
    pub height: f32,
    pub radius: f32,
    pub chaos_radius: f32,
}

impl OrnamentParams {
    pub fn for_kind(kind: OrnamentKind) -> Self {
        Self {
            kind,
            count: kind.default_count(),
            height: TREE_HEIGHT,
            radius: TREE_RADIUS,
            chaos_radius: ORNAMENT_CHAOS_RADIUS,
        }
    }
}

/// One instanced ornament. Rotations are XYZ Euler angles in radians; colors
/// are linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstancedElement {
    pub chaos_position: Vec3,
    pub target_position: Vec3,
    pub chaos_rotation: Vec3,
    pub target_rotation: Vec3,
    pub scale: f32,
    pub color: Vec3,
    /// Reserved for per-element animation rate variance.
    pub speed_factor: f32,
}

#[derive(Clone, Debug)]
pub struct OrnamentPopulation {
    kind: OrnamentKind,
    elements: Vec<InstancedElement>,
}

impl OrnamentPopulation {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &OrnamentParams) -> Self {
        let elements = (0..params.count)
            .map(|i| match params.kind {
                OrnamentKind::Bauble => bauble(rng, i, params),
                OrnamentKind::GiftBox => gift_box(rng, i, params),
                OrnamentKind::PhotoCard => photo_card(rng, i, params),
            })
            .collect();
        Self {
            kind: params.kind,
            elements,
        }
    }

    pub fn kind(&self) -> OrnamentKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[InstancedElement] {
        &self.elements
    }
}

fn bauble<R: Rng + ?Sized>(rng: &mut R, i: usize, p: &OrnamentParams) -> InstancedElement {
    let chaos_position = sample_sphere_volume(rng, p.chaos_radius);
    let target_position = sample_spiral(i, p.count, p.height, p.radius, BAUBLE_SPIRAL_TURNS);
    let chaos_rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
    let target_rotation = Vec3::new(0.0, rng.gen::<f32>() * TAU, 0.0);
    let scale = rng.gen::<f32>() * 0.3 + 0.15;
    let color = if rng.gen::<f32>() > 1.0 - BAUBLE_GOLD_PROBABILITY {
        srgb_to_linear_vec3(GOLD)
    } else {
        srgb_to_linear_vec3(DEEP_RED)
    };
    InstancedElement {
        chaos_position,
        target_position,
        chaos_rotation,
        target_rotation,
        scale,
        color,
        speed_factor: rng.gen::<f32>() * 0.5 + 0.5,
    }
}

fn gift_box<R: Rng + ?Sized>(rng: &mut R, i: usize, p: &OrnamentParams) -> InstancedElement {
    let chaos_position = sample_sphere_volume(rng, p.chaos_radius);
    let theta = if p.count == 0 {
        0.0
    } else {
        i as f32 / p.count as f32 * TAU
    };
    let r = rng.gen::<f32>() * 3.0 + 2.5;
    let target_position = Vec3::new(
        r * theta.cos(),
        -p.height / 2.0 - GIFT_RING_DROP,
        r * theta.sin(),
    );
    let chaos_rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
    let target_rotation = Vec3::new(0.0, theta + rng.gen::<f32>(), 0.0);
    InstancedElement {
        chaos_position,
        target_position,
        chaos_rotation,
        target_rotation,
        scale: rng.gen::<f32>() * 0.6 + 0.4,
        color: srgb_to_linear_vec3(DARK_GOLD),
        speed_factor: rng.gen::<f32>() * 0.2 + 0.8,
    }
}

fn photo_card<R: Rng + ?Sized>(rng: &mut R, i: usize, p: &OrnamentParams) -> InstancedElement {
    let chaos_position = sample_sphere_volume(rng, p.chaos_radius);
    let on_spiral = sample_spiral(i, p.count, p.height, p.radius, PHOTO_SPIRAL_TURNS);
    let angle = on_spiral.z.atan2(on_spiral.x);
    let r = (on_spiral.x * on_spiral.x + on_spiral.z * on_spiral.z).sqrt() + PHOTO_RADIAL_PUSH;
    let target_position = Vec3::new(r * angle.cos(), on_spiral.y, r * angle.sin());
    let chaos_rotation = Vec3::new(
        rng.gen::<f32>() * PI,
        rng.gen::<f32>() * PI,
        rng.gen::<f32>() * PI,
    );
    // face outwards
    let target_rotation = Vec3::new(0.0, -angle + FRAC_PI_2, rng.gen::<f32>() * 0.1 - 0.05);
    let color = PHOTO_PALETTE
        .choose(rng)
        .copied()
        .map(srgb_to_linear_vec3)
        .unwrap_or(Vec3::ONE);
    InstancedElement {
        chaos_position,
        target_position,
        chaos_rotation,
        target_rotation,
        scale: PHOTO_SCALE,
        color,
        speed_factor: rng.gen::<f32>() * 0.3 + 0.6,
    }
}
