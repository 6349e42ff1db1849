//! The whole choreographed scene: populations, progress, rotation and the
//! per-frame buffers they are evaluated into.

use crate::buffers::{FrameBuffers, FrameUniforms, MeshInstance, PointInstance};
use crate::constants::*;
use crate::control::ControlSnapshot;
use crate::error::SceneError;
use crate::population::{
    population_rng, FoliageParams, FoliagePopulation, OrnamentKind, OrnamentParams,
    OrnamentPopulation,
};
use crate::pose::RotationMapper;
use crate::progress::ProgressController;
use crate::stars::{star_color, star_point_size, StarField, StarParams};
use crate::transform::{euler_xyz, evaluate_foliage, evaluate_ornament, foliage_point_size};
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct SceneParams {
    pub foliage: FoliageParams,
    pub baubles: OrnamentParams,
    pub gift_boxes: OrnamentParams,
    pub photo_cards: OrnamentParams,
    pub stars: StarParams,
    pub foliage_rate: f32,
    pub ornament_rate: f32,
    pub rotation_smoothing: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            foliage: FoliageParams::default(),
            baubles: OrnamentParams::for_kind(OrnamentKind::Bauble),
            gift_boxes: OrnamentParams::for_kind(OrnamentKind::GiftBox),
            photo_cards: OrnamentParams::for_kind(OrnamentKind::PhotoCard),
            stars: StarParams::default(),
            foliage_rate: FOLIAGE_PROGRESS_RATE,
            ornament_rate: ORNAMENT_PROGRESS_RATE,
            rotation_smoothing: ROTATION_SMOOTHING,
        }
    }
}

/// Every static population a scene is built from.
#[derive(Clone, Debug)]
pub struct Populations {
    pub foliage: FoliagePopulation,
    pub baubles: OrnamentPopulation,
    pub gift_boxes: OrnamentPopulation,
    pub photo_cards: OrnamentPopulation,
    pub stars: StarField,
}

impl Populations {
    /// One RNG stream per population, so resizing one leaves the others intact.
    pub fn generate(params: &SceneParams, seed: u64) -> Self {
        let ornaments =
            |p: &OrnamentParams, stream: u64| OrnamentPopulation::generate(&mut population_rng(seed, stream), p);
        Self {
            foliage: FoliagePopulation::generate(&mut population_rng(seed, 0), &params.foliage),
            baubles: ornaments(&params.baubles, 1),
            gift_boxes: ornaments(&params.gift_boxes, 2),
            photo_cards: ornaments(&params.photo_cards, 3),
            stars: StarField::generate(&mut population_rng(seed, 4), &params.stars),
        }
    }
}

struct Ornaments {
    population: OrnamentPopulation,
    progress: ProgressController,
}

pub struct Scene {
    foliage: FoliagePopulation,
    foliage_progress: ProgressController,
    baubles: Ornaments,
    gift_boxes: Ornaments,
    photo_cards: Ornaments,
    stars: StarField,
    rotation: RotationMapper,
    buffers: FrameBuffers,
}

impl Scene {
    /// Generate every population from `seed`. Same seed, same scene.
    pub fn new(params: SceneParams, seed: u64) -> Result<Self, SceneError> {
        let populations = Populations::generate(&params, seed);
        log::info!("[scene] seed={seed:#x}");
        Self::from_populations(&params, populations)
    }

    /// Build a scene from populations generated elsewhere. Each ornament
    /// population must sit in the slot of its own kind.
    pub fn from_populations(params: &SceneParams, populations: Populations) -> Result<Self, SceneError> {
        let Populations {
            foliage,
            baubles,
            gift_boxes,
            photo_cards,
            stars,
        } = populations;
        let ornaments = |population: OrnamentPopulation, slot: OrnamentKind| {
            if population.kind() != slot {
                return Err(SceneError::OrnamentKindMismatch {
                    slot: slot.as_str(),
                    found: population.kind().as_str(),
                });
            }
            Ok(Ornaments {
                population,
                progress: ProgressController::new(params.ornament_rate),
            })
        };
        let baubles = ornaments(baubles, OrnamentKind::Bauble)?;
        let gift_boxes = ornaments(gift_boxes, OrnamentKind::GiftBox)?;
        let photo_cards = ornaments(photo_cards, OrnamentKind::PhotoCard)?;

        let buffers = FrameBuffers::with_counts(
            foliage.len(),
            baubles.population.len(),
            gift_boxes.population.len(),
            photo_cards.population.len(),
            stars.len(),
        );
        log::info!(
            "[scene] foliage={} baubles={} gift_boxes={} photo_cards={} stars={}",
            foliage.len(),
            baubles.population.len(),
            gift_boxes.population.len(),
            photo_cards.population.len(),
            stars.len()
        );

        Ok(Self {
            foliage,
            foliage_progress: ProgressController::new(params.foliage_rate),
            baubles,
            gift_boxes,
            photo_cards,
            stars,
            rotation: RotationMapper::new(params.rotation_smoothing),
            buffers,
        })
    }

    /// Advance progress and rotation by `dt_sec`, then rewrite every buffer.
    pub fn update(&mut self, control: ControlSnapshot, dt_sec: f32, elapsed_sec: f32) {
        let foliage_p = self.foliage_progress.step(control.mode, dt_sec);
        for o in [&mut self.baubles, &mut self.gift_boxes, &mut self.photo_cards] {
            o.progress.step(control.mode, dt_sec);
        }
        self.rotation.step(&control.pose, elapsed_sec, dt_sec);

        self.buffers.foliage_uniforms = FrameUniforms {
            time: elapsed_sec,
            progress: foliage_p,
        };
        self.buffers.ornament_uniforms = FrameUniforms {
            time: elapsed_sec,
            progress: self.baubles.progress.progress(),
        };

        write_foliage(&self.foliage, foliage_p, elapsed_sec, &mut self.buffers.foliage);
        write_ornaments(&self.baubles, elapsed_sec, &mut self.buffers.baubles);
        write_ornaments(&self.gift_boxes, elapsed_sec, &mut self.buffers.gift_boxes);
        write_ornaments(&self.photo_cards, elapsed_sec, &mut self.buffers.photo_cards);
        write_stars(&self.stars, elapsed_sec, &mut self.buffers.stars);
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    pub fn foliage(&self) -> &FoliagePopulation {
        &self.foliage
    }

    pub fn ornaments(&self, kind: OrnamentKind) -> &OrnamentPopulation {
        &self.ornament_slot(kind).population
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn foliage_progress(&self) -> f32 {
        self.foliage_progress.progress()
    }

    pub fn ornament_progress(&self, kind: OrnamentKind) -> f32 {
        self.ornament_slot(kind).progress.progress()
    }

    /// Current (tilt, yaw) of the tree group.
    pub fn rotation(&self) -> Vec2 {
        self.rotation.rotation()
    }

    pub fn rotation_target(&self) -> Vec2 {
        self.rotation.target()
    }

    /// Model matrix applied to every population except the stars.
    pub fn group_matrix(&self) -> Mat4 {
        let r = self.rotation.rotation();
        Mat4::from_quat(euler_xyz(Vec3::new(r.x, r.y, 0.0)))
    }

    fn ornament_slot(&self, kind: OrnamentKind) -> &Ornaments {
        match kind {
            OrnamentKind::Bauble => &self.baubles,
            OrnamentKind::GiftBox => &self.gift_boxes,
            OrnamentKind::PhotoCard => &self.photo_cards,
        }
    }
}

// Buffers are sized from the populations in `from_populations`, so the zips
// below always cover every element.

fn write_foliage(pop: &FoliagePopulation, progress: f32, time: f32, out: &mut [PointInstance]) {
    debug_assert_eq!(out.len(), pop.len());
    let attrs = pop.chaos().iter().zip(pop.target()).zip(pop.seeds());
    for (slot, ((chaos, target), seed)) in out.iter_mut().zip(attrs) {
        let s = evaluate_foliage(*chaos, *target, *seed, progress, time);
        *slot = PointInstance::new(s.position, foliage_point_size(*seed), s.color);
    }
}

fn write_ornaments(o: &Ornaments, time: f32, out: &mut [MeshInstance]) {
    debug_assert_eq!(out.len(), o.population.len());
    let kind = o.population.kind();
    let progress = o.progress.progress();
    let material = kind.material_id();
    for (i, (slot, element)) in out.iter_mut().zip(o.population.elements()).enumerate() {
        let tf = evaluate_ornament(kind, element, i, progress, time);
        *slot = MeshInstance::new(tf.to_matrix(), element.color, material);
    }
}

fn write_stars(field: &StarField, time: f32, out: &mut [PointInstance]) {
    debug_assert_eq!(out.len(), field.len());
    let color = star_color();
    for (slot, star) in out.iter_mut().zip(field.stars()) {
        *slot = PointInstance::new(star.position, star_point_size(star, time), color);
    }
}
