//! Keypoint frame - one MediaPipe pose result in Rust form
//!
//! The pose model runs in JavaScript and pushes flat Float32Arrays.
//! A frame is only valid for the tick that consumes it.

use serde::{Deserialize, Serialize};

use super::visibility_gate::VisibilityGate;
use crate::error::FrameError;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Skeleton connections for the visualizer (start, end)
pub const POSE_CONNECTIONS: [(usize, usize); 12] = [
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW),
    (RIGHT_ELBOW, RIGHT_WRIST),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE),
    (RIGHT_KNEE, RIGHT_ANKLE),
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_HIP, RIGHT_HIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 3D landmark point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth
}

impl Point3D {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which side of the body feeds the rule set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySide {
    Left,
    #[default]
    Right,
}

/// Landmark indices for one side of the body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Joints {
    pub shoulder: usize,
    pub elbow: usize,
    pub wrist: usize,
    pub hip: usize,
    pub knee: usize,
    pub ankle: usize,
}

impl BodySide {
    pub fn joints(&self) -> Joints {
        match self {
            BodySide::Left => Joints {
                shoulder: LEFT_SHOULDER,
                elbow: LEFT_ELBOW,
                wrist: LEFT_WRIST,
                hip: LEFT_HIP,
                knee: LEFT_KNEE,
                ankle: LEFT_ANKLE,
            },
            BodySide::Right => Joints {
                shoulder: RIGHT_SHOULDER,
                elbow: RIGHT_ELBOW,
                wrist: RIGHT_WRIST,
                hip: RIGHT_HIP,
                knee: RIGHT_KNEE,
                ankle: RIGHT_ANKLE,
            },
        }
    }
}

/// All 33 landmarks of one frame; absent landmarks are `None`
#[derive(Clone, Debug, PartialEq)]
pub struct KeypointFrame {
    landmarks: [Option<Point3D>; LANDMARK_COUNT],
}

impl KeypointFrame {
    /// Frame with every landmark present
    pub fn from_points(points: [Point3D; LANDMARK_COUNT]) -> Self {
        Self {
            landmarks: points.map(Some),
        }
    }

    /// Frame with no landmarks; fill with `with_landmark`
    pub fn empty() -> Self {
        Self {
            landmarks: [None; LANDMARK_COUNT],
        }
    }

    pub fn with_landmark(mut self, index: usize, point: Point3D) -> Self {
        if index < LANDMARK_COUNT {
            self.landmarks[index] = Some(point);
        }
        self
    }

    /// Parse a flat array pushed from JavaScript
    ///
    /// Accepts 33 × 3 (x, y, z) or 33 × 4 (x, y, z, visibility) values.
    /// Non-finite coordinates and landmarks the gate rejects become absent.
    pub fn from_flat(data: &[f32], gate: &VisibilityGate) -> Result<Self, FrameError> {
        let stride = match data.len() {
            n if n == LANDMARK_COUNT * 3 => 3,
            n if n == LANDMARK_COUNT * 4 => 4,
            len => return Err(FrameError::InvalidLength { len }),
        };

        let mut frame = Self::empty();
        for (i, chunk) in data.chunks_exact(stride).enumerate() {
            let point = Point3D::new(chunk[0], chunk[1], chunk[2]);
            let visibility = chunk.get(3).copied();
            if point.is_finite() && gate.accepts(visibility) {
                frame.landmarks[i] = Some(point);
            }
        }
        Ok(frame)
    }

    /// Get a landmark, or `MissingLandmark` if absent this frame
    pub fn get(&self, index: usize) -> Result<Point3D, FrameError> {
        self.landmarks
            .get(index)
            .copied()
            .flatten()
            .ok_or(FrameError::MissingLandmark { index })
    }

    /// Number of landmarks present
    pub fn present_count(&self) -> usize {
        self.landmarks.iter().filter(|lm| lm.is_some()).count()
    }
}
