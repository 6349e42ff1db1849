//! Hand pose → scene rotation.
//!
//! The pose producer writes at ~15 Hz and may go stale; the mapper runs every
//! frame and only ever moves the rotation a smoothed step towards the latest
//! target, so noisy or missing samples never cause a jump.

use crate::constants::{IDLE_SPIN_RATE, POSE_ROTATION_GAIN, ROTATION_SMOOTHING};
use glam::Vec2;

/// Latest hand sample in normalized image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSample {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl Default for PoseSample {
    fn default() -> Self {
        Self::inactive()
    }
}

impl PoseSample {
    pub const fn inactive() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            active: false,
        }
    }

    pub const fn active(x: f32, y: f32) -> Self {
        Self { x, y, active: true }
    }

    /// Centroid of the tracked landmarks, or an inactive sample when there are none.
    pub fn from_landmarks(points: &[Vec2]) -> Self {
        if points.is_empty() {
            return Self::inactive();
        }
        let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        let c = sum / points.len() as f32;
        Self::active(c.x, c.y)
    }
}

/// Target rotation (x = tilt, y = yaw) for a pose at elapsed time `elapsed_sec`.
///
/// Inactive samples ignore x/y entirely and fall back to a slow idle spin.
pub fn target_rotation(sample: &PoseSample, elapsed_sec: f32) -> Vec2 {
    if sample.active {
        Vec2::new(
            (sample.y - 0.5) * POSE_ROTATION_GAIN,
            (sample.x - 0.5) * POSE_ROTATION_GAIN,
        )
    } else {
        Vec2::new(0.0, elapsed_sec * IDLE_SPIN_RATE)
    }
}

#[derive(Clone, Debug)]
pub struct RotationMapper {
    rotation: Vec2,
    target: Vec2,
    smoothing: f32,
}

impl Default for RotationMapper {
    fn default() -> Self {
        Self::new(ROTATION_SMOOTHING)
    }
}

impl RotationMapper {
    pub fn new(smoothing: f32) -> Self {
        Self {
            rotation: Vec2::ZERO,
            target: Vec2::ZERO,
            smoothing,
        }
    }

    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Recompute the target from `sample` and move each axis towards it.
    pub fn step(&mut self, sample: &PoseSample, elapsed_sec: f32, dt_sec: f32) -> Vec2 {
        self.target = target_rotation(sample, elapsed_sec);
        let alpha = (dt_sec.max(0.0) * self.smoothing).min(1.0);
        self.rotation.x += (self.target.x - self.rotation.x) * alpha;
        self.rotation.y += (self.target.y - self.rotation.y) * alpha;
        self.rotation
    }
}
