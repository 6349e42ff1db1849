//! Single-slot control state shared between input producers and the frame loop.
//!
//! Writers overwrite, the reader copies the latest value. There is no queue:
//! a sample that is overwritten before the next frame is simply never seen.

use crate::pose::PoseSample;
use crate::progress::Mode;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlSnapshot {
    pub mode: Mode,
    pub pose: PoseSample,
}

/// Result of interpreting one recognition frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlUpdate {
    pub mode: Option<Mode>,
    pub pose: PoseSample,
}

#[derive(Clone, Debug, Default)]
pub struct SharedControl {
    inner: Arc<Mutex<ControlSnapshot>>,
}

impl SharedControl {
    pub fn new(mode: Mode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControlSnapshot {
                mode,
                pose: PoseSample::inactive(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlSnapshot> {
        // A panicking writer cannot leave a Copy snapshot half-written.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the mode; returns true when it actually changed.
    pub fn set_mode(&self, mode: Mode) -> bool {
        let mut s = self.lock();
        if s.mode == mode {
            return false;
        }
        log::info!("[mode] {} -> {}", s.mode, mode);
        s.mode = mode;
        true
    }

    pub fn publish_pose(&self, pose: PoseSample) {
        self.lock().pose = pose;
    }

    pub fn apply(&self, update: ControlUpdate) {
        if let Some(mode) = update.mode {
            self.set_mode(mode);
        }
        self.publish_pose(update.pose);
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        *self.lock()
    }

    pub fn mode(&self) -> Mode {
        self.lock().mode
    }
}
