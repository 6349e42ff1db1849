// Host-side tests for per-frame element evaluation.

use glam::Vec3;
use tree_core::transform::*;
use tree_core::*;

#[test]
fn smoothstep_clamps_and_is_symmetric() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
    assert_eq!(smoothstep(0.5, 0.5, 0.6), 1.0);
}

#[test]
fn staggered_progress_hits_both_ends() {
    for seed in [0.0, 0.25, 0.5, 0.99] {
        assert_eq!(staggered_progress(0.0, seed), 0.0);
        assert!((staggered_progress(1.0, seed) - 1.0).abs() < 1e-6);
    }
}

#[test]
fn higher_seeds_finish_later_but_never_reverse() {
    let low = staggered_progress(0.5, 0.0);
    let high = staggered_progress(0.5, 1.0);
    assert!(high > low);

    let mut prev = 0.0;
    for i in 0..=100 {
        let p = staggered_progress(i as f32 / 100.0, 0.4);
        assert!(p >= prev - 1e-6);
        prev = p;
    }
}

#[test]
fn foliage_sits_on_chaos_at_zero_progress() {
    let chaos = Vec3::new(10.0, -3.0, 4.0);
    let target = Vec3::new(1.0, 2.0, 0.5);
    let s = evaluate_foliage(chaos, target, 0.3, 0.0, 12.0);
    assert_eq!(s.position, chaos);
    assert_eq!(s.local, 0.0);
}

#[test]
fn wind_only_applies_once_formed() {
    let chaos = Vec3::new(10.0, -3.0, 4.0);
    let target = Vec3::new(1.0, 2.0, 0.5);
    let seed = 0.3;

    let mid = evaluate_foliage(chaos, target, seed, 0.5, 3.7);
    let expected = chaos.lerp(target, staggered_progress(0.5, seed));
    assert!((mid.position - expected).length() < 1e-5);

    let formed = evaluate_foliage(chaos, target, seed, 1.0, 3.7);
    let offset = formed.position - target;
    assert!(offset.y.abs() < 1e-5);
    assert!(offset.x.abs() <= 0.05 + 1e-5);
    assert!(offset.z.abs() <= 0.03 + 1e-5);
}

#[test]
fn foliage_color_gains_gold_only_when_formed() {
    let deep = Vec3::from(FOLIAGE_DEEP);
    let light = Vec3::from(FOLIAGE_LIGHT);
    for i in 0..50 {
        let t = i as f32 * 0.37;
        let c = foliage_color(-5.0, 0.42, 0.0, t);
        assert!((c - deep).length() < 1e-5);
    }
    let top = foliage_color(5.0, 0.42, 0.0, 0.0);
    assert!((top - deep.lerp(light, 0.7)).length() < 1e-5);
    // out-of-range heights stay on the gradient
    assert_eq!(foliage_color(100.0, 0.42, 0.0, 0.0), top);
}

#[test]
fn point_size_grows_with_seed() {
    assert!(foliage_point_size(0.9) > foliage_point_size(0.1));
    assert!((foliage_point_size(0.0) - 20.0 * FOLIAGE_POINT_SCALE).abs() < 1e-7);
}

fn element() -> InstancedElement {
    InstancedElement {
        chaos_position: Vec3::new(8.0, 8.0, 8.0),
        target_position: Vec3::new(1.0, -2.0, 3.0),
        chaos_rotation: Vec3::new(0.5, 1.0, 0.0),
        target_rotation: Vec3::new(0.0, 2.0, 0.0),
        scale: 0.5,
        color: Vec3::ONE,
        speed_factor: 1.0,
    }
}

#[test]
fn gift_boxes_wait_for_their_window() {
    let e = element();
    let early = evaluate_ornament(OrnamentKind::GiftBox, &e, 0, 0.15, 1.0);
    assert_eq!(early.position, e.chaos_position);

    let done = evaluate_ornament(OrnamentKind::GiftBox, &e, 0, 1.0, 1.0);
    assert!((done.position - e.target_position).length() < 1e-5);
    assert_eq!(done.rotation, e.target_rotation);
}

#[test]
fn gift_boxes_tumble_until_formed() {
    let e = element();
    let t = evaluate_ornament(OrnamentKind::GiftBox, &e, 0, 0.5, 2.0);
    assert!((t.rotation.x - 2.0).abs() < 1e-6);
    assert!((t.rotation.z - 2.0).abs() < 1e-6);
}

#[test]
fn photo_cards_settle_before_full_progress() {
    let e = element();
    let t = evaluate_ornament(OrnamentKind::PhotoCard, &e, 3, 0.95, 0.0);
    assert!((t.position - e.target_position).length() < 1e-5);
    assert_eq!(t.scale, e.scale);
    // sway only touches z
    let sway = evaluate_ornament(OrnamentKind::PhotoCard, &e, 3, 0.95, 1.3);
    assert_eq!(sway.rotation.x, e.target_rotation.x);
    assert_eq!(sway.rotation.y, e.target_rotation.y);
    assert!((sway.rotation.z - e.target_rotation.z).abs() <= 0.08 + 1e-6);
}

#[test]
fn baubles_bob_and_pulse_within_bounds() {
    let e = element();
    for i in 0..100 {
        let t = i as f32 * 0.13;
        let tf = evaluate_ornament(OrnamentKind::Bauble, &e, 7, 1.0, t);
        assert!((tf.position.y - e.target_position.y).abs() <= 0.05 + 1e-5);
        assert!(tf.scale >= e.scale * 0.6 - 1e-6 && tf.scale <= e.scale + 1e-6);
    }
}

#[test]
fn instance_matrix_carries_position_and_scale() {
    let tf = InstanceTransform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.3, 0.2, 0.1),
        scale: 2.0,
    };
    let m = tf.to_matrix();
    assert!((m.w_axis.truncate() - tf.position).length() < 1e-6);
    assert!((m.x_axis.truncate().length() - 2.0).abs() < 1e-5);
}
