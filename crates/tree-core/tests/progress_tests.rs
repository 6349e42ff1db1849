// Host-side tests for mode handling and progress smoothing.

use tree_core::*;

const DT: f32 = 1.0 / 60.0;

#[test]
fn initial_progress_is_chaos() {
    let c = ProgressController::new(FOLIAGE_PROGRESS_RATE);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(Mode::default(), Mode::Formed);
}

#[test]
fn formed_for_ten_seconds_converges() {
    for rate in [FOLIAGE_PROGRESS_RATE, ORNAMENT_PROGRESS_RATE] {
        let mut c = ProgressController::new(rate);
        for _ in 0..600 {
            c.step(Mode::Formed, DT);
        }
        assert!(c.progress() > 0.999, "rate {rate}: {}", c.progress());
    }
}

#[test]
fn stepping_at_the_target_is_a_no_op() {
    let mut formed = ProgressController::with_progress(1.2, 1.0);
    assert_eq!(formed.step(Mode::Formed, DT), 1.0);
    let mut chaos = ProgressController::with_progress(1.2, 0.0);
    assert_eq!(chaos.step(Mode::Chaos, DT), 0.0);
}

#[test]
fn rapid_toggling_never_jumps() {
    let mut c = ProgressController::new(FOLIAGE_PROGRESS_RATE);
    let mut prev = c.progress();
    for frame in 0..300 {
        let mode = if (frame / 3) % 2 == 0 { Mode::Formed } else { Mode::Chaos };
        let p = c.step(mode, DT);
        assert!((0.0..=1.0).contains(&p));
        assert!((p - prev).abs() <= DT * FOLIAGE_PROGRESS_RATE + 1e-6);
        prev = p;
    }
}

#[test]
fn long_frame_lands_on_target_without_overshoot() {
    let mut c = ProgressController::with_progress(1.2, 0.3);
    assert_eq!(c.step(Mode::Formed, 5.0), 1.0);
    assert_eq!(c.step(Mode::Chaos, 5.0), 0.0);
}

#[test]
fn negative_dt_is_ignored() {
    let mut c = ProgressController::with_progress(1.2, 0.5);
    assert_eq!(c.step(Mode::Formed, -1.0), 0.5);
}

#[test]
fn gesture_labels_map_to_modes() {
    assert_eq!(Mode::from_gesture("Open_Palm"), Some(Mode::Chaos));
    assert_eq!(Mode::from_gesture("Closed_Fist"), Some(Mode::Formed));
    assert_eq!(Mode::from_gesture("Thumb_Up"), None);
    assert_eq!(Mode::Chaos.to_string(), "CHAOS");
    assert_eq!(Mode::Formed.as_str(), "FORMED");
}
