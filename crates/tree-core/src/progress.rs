//! Discrete scene mode and the smoothed per-population progress scalar.

use std::fmt;

/// Process-wide scene mode, changed only by UI actions or recognized gestures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Chaos,
    #[default]
    Formed,
}

impl Mode {
    /// Progress value this mode pulls towards.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Mode::Chaos => 0.0,
            Mode::Formed => 1.0,
        }
    }

    /// Mode requested by a gesture label; unknown labels leave the mode alone.
    pub fn from_gesture(label: &str) -> Option<Mode> {
        match label {
            "Open_Palm" => Some(Mode::Chaos),
            "Closed_Fist" => Some(Mode::Formed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chaos => "CHAOS",
            Mode::Formed => "FORMED",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exponentially smoothed progress towards the current mode's target.
///
/// Each step moves `progress` a fraction `dt * rate` of the remaining distance,
/// so it approaches 0 or 1 asymptotically and never jumps when the mode flips
/// mid-transition.
#[derive(Clone, Debug)]
pub struct ProgressController {
    progress: f32,
    rate: f32,
}

impl ProgressController {
    pub fn new(rate: f32) -> Self {
        Self {
            progress: 0.0,
            rate,
        }
    }

    pub fn with_progress(rate: f32, progress: f32) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            rate,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Advance one frame and return the new progress.
    pub fn step(&mut self, mode: Mode, dt_sec: f32) -> f32 {
        // Clamped so a long frame (tab in background) lands on the target
        // instead of overshooting it.
        let alpha = (dt_sec.max(0.0) * self.rate).min(1.0);
        self.progress = lerp(self.progress, mode.target(), alpha);
        self.progress
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
