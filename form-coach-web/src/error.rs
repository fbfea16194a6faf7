//! Error types for frame processing, history storage and the JS bridge

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Joint angle cannot be computed from the given points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// One of the two limb vectors has (near) zero length
    #[error("degenerate geometry: coincident keypoints")]
    Degenerate,
}

/// A keypoint frame that cannot be classified this tick
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("invalid landmark data length: {len} (expected 99 or 132)")]
    InvalidLength { len: usize },

    #[error("landmark {index} missing from frame")]
    MissingLandmark { index: usize },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Workout history could not be read or written
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("storage access failed: {0}")]
    Access(String),

    #[error("history encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced through the wasm_bindgen entry points
#[derive(Debug, Error)]
pub enum CoachError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("tick scheduler failed: {0}")]
    Scheduler(String),

    #[error("unknown exercise '{0}' (expected squat or pushup)")]
    UnknownExercise(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("coach not initialized - call init() first")]
    NotInitialized,
}

impl From<CoachError> for JsValue {
    fn from(err: CoachError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
