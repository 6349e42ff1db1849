use thiserror::Error;

/// Construction-time failures of the particle scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("{what}: attribute arrays disagree (chaos={chaos}, target={target}, seeds={seeds})")]
    PopulationMismatch {
        what: &'static str,
        chaos: usize,
        target: usize,
        seeds: usize,
    },
    #[error("{slot} slot was given a {found} population")]
    OrnamentKindMismatch {
        slot: &'static str,
        found: &'static str,
    },
}

/// Failures reported by the external control bridge (camera + gesture model).
///
/// None of these are fatal to the scene: it keeps running with an inactive
/// pose and whatever mode was last set from the UI.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("gesture model failed to load: {0}")]
    ModelLoad(String),
    #[error("camera permission denied: {0}")]
    CameraPermission(String),
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("recognition failed: {0}")]
    Inference(String),
}

impl BridgeError {
    /// Short text for the on-page status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            BridgeError::ModelLoad(_) => "AI Model Failed",
            BridgeError::CameraPermission(_) => "Please Allow Camera Access",
            BridgeError::Camera(_) => "Camera Error",
            BridgeError::Inference(_) => "Recognition Error",
        }
    }

    /// Map a DOM exception name from `getUserMedia` onto a bridge error.
    pub fn from_camera_exception(name: &str, detail: impl Into<String>) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => {
                BridgeError::CameraPermission(detail.into())
            }
            _ => BridgeError::Camera(detail.into()),
        }
    }
}
