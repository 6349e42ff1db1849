// Host-side tests for pose smoothing and rotation mapping.

use glam::Vec2;
use tree_core::*;

const DT: f32 = 1.0 / 60.0;

#[test]
fn inactive_pose_spins_slowly() {
    let t = target_rotation(&PoseSample::inactive(), 30.0);
    assert_eq!(t.x, 0.0);
    assert!((t.y - 3.0).abs() < 1e-5);
    // position is ignored while inactive
    let ignored = PoseSample {
        x: 0.9,
        y: 0.1,
        active: false,
    };
    assert_eq!(target_rotation(&ignored, 30.0), t);
}

#[test]
fn centered_hand_means_no_rotation() {
    assert_eq!(target_rotation(&PoseSample::active(0.5, 0.5), 99.0), Vec2::ZERO);
}

#[test]
fn held_hand_converges_to_its_yaw() {
    let mut mapper = RotationMapper::default();
    let pose = PoseSample::active(0.8, 0.5);
    let mut elapsed = 0.0;
    for _ in 0..120 {
        elapsed += DT;
        mapper.step(&pose, elapsed, DT);
    }
    let r = mapper.rotation();
    assert!((r.y - 0.45).abs() < 0.02, "yaw {}", r.y);
    assert!(r.x.abs() < 1e-6);
    assert!(r.y < 0.45 + 1e-6, "approach is monotone, never past the target");
}

#[test]
fn noisy_input_is_smoothed() {
    let mut mapper = RotationMapper::default();
    let mut prev = mapper.rotation();
    for i in 0..200 {
        let x = if i % 2 == 0 { 0.0 } else { 1.0 };
        let r = mapper.step(&PoseSample::active(x, 0.5), i as f32 * DT, DT);
        // per-frame movement bounded by alpha * max target distance
        assert!((r - prev).length() <= DT * ROTATION_SMOOTHING * 1.5 + 1e-5);
        prev = r;
    }
}

#[test]
fn long_frame_does_not_overshoot() {
    let mut mapper = RotationMapper::new(2.0);
    let r = mapper.step(&PoseSample::active(1.0, 0.0), 0.0, 10.0);
    assert_eq!(r, Vec2::new(-0.75, 0.75));
}

#[test]
fn landmark_centroid() {
    let pts = [Vec2::new(0.2, 0.4), Vec2::new(0.4, 0.6), Vec2::new(0.6, 0.5)];
    let p = PoseSample::from_landmarks(&pts);
    assert!(p.active);
    assert!((p.x - 0.4).abs() < 1e-6);
    assert!((p.y - 0.5).abs() < 1e-6);
    assert_eq!(PoseSample::from_landmarks(&[]), PoseSample::inactive());
}
