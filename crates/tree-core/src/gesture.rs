//! Decision logic of the external control bridge, kept free of browser APIs.
//!
//! The browser side only has to turn a recognizer result into a
//! [`GestureFrame`]; everything after that happens here.

use crate::constants::PREDICTION_INTERVAL_MS;
use crate::control::ControlUpdate;
use crate::pose::PoseSample;
use crate::progress::Mode;
use glam::Vec2;
use smallvec::SmallVec;

/// Landmarks per tracked hand.
pub const HAND_LANDMARKS: usize = 21;

/// Top gesture label and landmarks of the first detected hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureFrame {
    pub label: Option<String>,
    pub landmarks: SmallVec<[Vec2; HAND_LANDMARKS]>,
}

impl GestureFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_hand(&self) -> bool {
        self.label.is_some() && !self.landmarks.is_empty()
    }
}

/// Mode change and pose sample implied by one recognition frame.
pub fn interpret_frame(frame: &GestureFrame) -> ControlUpdate {
    if !frame.has_hand() {
        return ControlUpdate {
            mode: None,
            pose: PoseSample::inactive(),
        };
    }
    ControlUpdate {
        mode: frame.label.as_deref().and_then(Mode::from_gesture),
        pose: PoseSample::from_landmarks(&frame.landmarks),
    }
}

/// Zero-sized video frames appear while the camera warms up; skip them.
#[inline]
pub fn frame_is_usable(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}

/// Rate limiter for recognition calls driven from animation frames.
#[derive(Clone, Debug)]
pub struct PredictionThrottle {
    min_interval_ms: f64,
    last_ms: Option<f64>,
}

impl Default for PredictionThrottle {
    fn default() -> Self {
        Self::new(PREDICTION_INTERVAL_MS)
    }
}

impl PredictionThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_ms: None,
        }
    }

    /// True (and records `now_ms`) when enough time passed since the last run.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.min_interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Handed out when a bridge startup begins; compared again when it ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartTicket(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// Keep whatever the startup produced.
    Current,
    /// The page was hidden while starting: release the result, and start
    /// over if the page is visible again.
    Stale { restart: bool },
}

/// Start/stop bookkeeping for a bridge whose startup is asynchronous and can
/// outlive the page visit that asked for it.
#[derive(Clone, Debug)]
pub struct BridgeLifecycle {
    generation: u32,
    starting: bool,
    running: bool,
    visible: bool,
}

impl Default for BridgeLifecycle {
    fn default() -> Self {
        Self {
            generation: 0,
            starting: false,
            running: false,
            visible: true,
        }
    }
}

impl BridgeLifecycle {
    /// `None` while hidden, already starting, or already running.
    pub fn begin(&mut self) -> Option<StartTicket> {
        if !self.visible || self.starting || self.running {
            return None;
        }
        self.starting = true;
        Some(StartTicket(self.generation))
    }

    pub fn finish(&mut self, ticket: StartTicket, succeeded: bool) -> StartOutcome {
        self.starting = false;
        if ticket.0 != self.generation {
            return StartOutcome::Stale {
                restart: self.visible,
            };
        }
        self.running = succeeded;
        StartOutcome::Current
    }

    /// Page hidden: any running bridge must be released and any startup in
    /// flight becomes stale.
    pub fn hide(&mut self) {
        self.visible = false;
        self.running = false;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_starting(&self) -> bool {
        self.starting
    }
}
