// Host-side integration tests for the full scene update loop.

use glam::{Mat4, Vec3};
use tree_core::distribution::radial_distance;
use tree_core::*;

fn small_params() -> SceneParams {
    let mut p = SceneParams::default();
    p.foliage.count = 2_000;
    p.stars.count = 500;
    p
}

fn build(params: SceneParams, seed: u64) -> Scene {
    Scene::new(params, seed).expect("generated populations are consistent")
}

fn formed(control_mode: Mode) -> ControlSnapshot {
    ControlSnapshot {
        mode: control_mode,
        pose: PoseSample::inactive(),
    }
}

#[test]
fn scene_starts_scattered() {
    let scene = build(small_params(), 1);
    assert_eq!(scene.foliage_progress(), 0.0);
    for kind in OrnamentKind::ALL {
        assert_eq!(scene.ornament_progress(kind), 0.0);
    }
    assert_eq!(scene.group_matrix(), Mat4::IDENTITY);
}

#[test]
fn buffer_sizes_never_change() {
    let mut scene = build(small_params(), 2);
    let sizes = |s: &Scene| {
        let b = s.buffers();
        (b.foliage.len(), b.baubles.len(), b.gift_boxes.len(), b.photo_cards.len())
    };
    let before = sizes(&scene);
    assert_eq!(before, (2_000, BAUBLE_COUNT, GIFT_COUNT, PHOTO_COUNT));
    assert_eq!(scene.buffers().stars.len(), 500);

    let mut elapsed = 0.0;
    for frame in 0..120 {
        let mode = if frame < 60 { Mode::Formed } else { Mode::Chaos };
        elapsed += 1.0 / 60.0;
        scene.update(formed(mode), 1.0 / 60.0, elapsed);
        assert_eq!(sizes(&scene), before);
    }
}

#[test]
fn first_frame_writes_chaos_positions() {
    let mut scene = build(small_params(), 3);
    scene.update(formed(Mode::Chaos), 1.0 / 60.0, 0.0);
    let b = scene.buffers();
    for (inst, chaos) in b.foliage.iter().zip(scene.foliage().chaos()) {
        assert_eq!(Vec3::from(inst.position), *chaos);
    }
}

#[test]
fn full_tree_settles_inside_the_cone() {
    let mut scene = build(SceneParams::default(), 7);
    assert_eq!(scene.foliage().len(), FOLIAGE_COUNT);

    let mut elapsed = 0.0;
    for _ in 0..100 {
        elapsed += 0.1;
        scene.update(formed(Mode::Formed), 0.1, elapsed);
    }
    assert!(scene.foliage_progress() > 0.999);

    for t in scene.foliage().target() {
        assert!(t.y >= -6.0 && t.y <= 6.0);
        assert!(radial_distance(*t) <= 5.75 + 1e-4);
    }
    // rendered points add at most the wind sway on top
    for p in &scene.buffers().foliage {
        let p = Vec3::from(p.position);
        assert!(p.y >= -6.0 - 1e-3 && p.y <= 6.0 + 1e-3);
        assert!(radial_distance(p) <= 5.75 + 0.06);
    }
}

#[test]
fn ornaments_reach_targets_when_formed() {
    let mut scene = build(small_params(), 11);
    let mut elapsed = 0.0;
    for _ in 0..200 {
        elapsed += 0.1;
        scene.update(formed(Mode::Formed), 0.1, elapsed);
    }
    let gifts = scene.ornaments(OrnamentKind::GiftBox);
    for (inst, e) in scene.buffers().gift_boxes.iter().zip(gifts.elements()) {
        assert!((inst.translation() - e.target_position).length() < 1e-3);
        assert_eq!(inst.material, OrnamentKind::GiftBox.material_id());
    }
}

#[test]
fn pose_drives_group_rotation() {
    let mut scene = build(small_params(), 5);
    let control = ControlSnapshot {
        mode: Mode::Formed,
        pose: PoseSample::active(0.8, 0.5),
    };
    let mut elapsed = 0.0;
    for _ in 0..120 {
        elapsed += 1.0 / 60.0;
        scene.update(control, 1.0 / 60.0, elapsed);
    }
    assert!((scene.rotation_target().y - 0.45).abs() < 1e-5);
    assert!((scene.rotation().y - 0.45).abs() < 0.02);
    assert_ne!(scene.group_matrix(), Mat4::IDENTITY);
}

#[test]
fn uniforms_track_time_and_progress() {
    let mut scene = build(small_params(), 9);
    scene.update(formed(Mode::Formed), 0.5, 4.0);
    let b = scene.buffers();
    assert_eq!(b.foliage_uniforms.time, 4.0);
    assert!((b.foliage_uniforms.progress - 0.6).abs() < 1e-5);
    assert!((b.ornament_uniforms.progress - 0.4).abs() < 1e-5);
}

#[test]
fn same_seed_renders_identical_frames() {
    let mut a = build(small_params(), 21);
    let mut b = build(small_params(), 21);
    a.update(formed(Mode::Formed), 0.25, 1.0);
    b.update(formed(Mode::Formed), 0.25, 1.0);
    assert_eq!(a.buffers().foliage, b.buffers().foliage);
    assert_eq!(a.buffers().photo_cards, b.buffers().photo_cards);
}

#[test]
fn ornament_in_wrong_slot_is_rejected() {
    let params = small_params();
    let mut populations = Populations::generate(&params, 13);
    std::mem::swap(&mut populations.baubles, &mut populations.gift_boxes);
    let err = Scene::from_populations(&params, populations).err();
    assert_eq!(
        err,
        Some(SceneError::OrnamentKindMismatch {
            slot: "bauble",
            found: "gift-box",
        })
    );
}

#[test]
fn mismatched_foliage_arrays_never_reach_a_scene() {
    fn assemble(params: &SceneParams, seeds: Vec<f32>) -> Result<Scene, SceneError> {
        let mut populations = Populations::generate(params, 17);
        let f = &populations.foliage;
        populations.foliage = FoliagePopulation::from_parts(f.chaos().to_vec(), f.target().to_vec(), seeds)?;
        Scene::from_populations(params, populations)
    }
    let params = small_params();
    let err = assemble(&params, vec![0.5; 10]).err();
    assert!(matches!(
        err,
        Some(SceneError::PopulationMismatch { chaos: 2_000, target: 2_000, seeds: 10, .. })
    ));
    assert!(assemble(&params, vec![0.5; 2_000]).is_ok());
}

#[test]
fn rapid_toggling_moves_points_smoothly() {
    let params = small_params();
    let mut scene = build(params.clone(), 19);
    let dt = 1.0 / 60.0;
    let mut elapsed = 0.0;
    // get halfway through the morph first
    while scene.foliage_progress() < 0.5 {
        elapsed += dt;
        scene.update(formed(Mode::Formed), dt, elapsed);
    }

    // steepest slope of the staggered, eased local progress
    let slope = 3.0 * 1.5 / (1.0 - STAGGER_SPAN);
    let wind = 2.0 * (0.05f32.powi(2) + 0.03f32.powi(2)).sqrt();
    let mut previous: Vec<Vec3> = scene.buffers().foliage.iter().map(|p| Vec3::from(p.position)).collect();
    for frame in 0..240 {
        let mode = if frame % 2 == 0 { Mode::Chaos } else { Mode::Formed };
        let before = scene.foliage_progress();
        elapsed += dt;
        scene.update(formed(mode), dt, elapsed);
        assert!((scene.foliage_progress() - before).abs() <= dt * params.foliage_rate + 1e-6);

        let pop = scene.foliage();
        for (i, inst) in scene.buffers().foliage.iter().enumerate() {
            let now = Vec3::from(inst.position);
            let span = (pop.target()[i] - pop.chaos()[i]).length();
            let bound = slope * dt * params.foliage_rate * span + wind + 1e-4;
            assert!(
                (now - previous[i]).length() <= bound,
                "point {i} jumped {} > {bound}",
                (now - previous[i]).length()
            );
            previous[i] = now;
        }
    }
    // alternating targets keep progress pinned near where toggling began
    assert!((scene.foliage_progress() - 0.5).abs() < 0.05);
}

#[test]
fn stars_ignore_the_tree_rotation() {
    let mut scene = build(small_params(), 23);
    let control = ControlSnapshot {
        mode: Mode::Formed,
        pose: PoseSample::active(0.9, 0.1),
    };
    let mut elapsed = 0.0;
    for _ in 0..60 {
        elapsed += 0.05;
        scene.update(control, 0.05, elapsed);
    }
    assert_ne!(scene.group_matrix(), Mat4::IDENTITY);
    for (inst, star) in scene.buffers().stars.iter().zip(scene.stars().stars()) {
        assert_eq!(Vec3::from(inst.position), star.position);
        assert!(inst.size > 0.0 && inst.size <= star.size * (1.0 + STAR_TWINKLE) + 1e-6);
    }
}
