//! Pose module - keypoint frames and joint geometry
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod angles;
mod visibility_gate;

pub use landmarks::{
    Point3D, KeypointFrame, BodySide, Joints,
    LANDMARK_COUNT, POSE_CONNECTIONS,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
};
pub use angles::angle_at_vertex;
pub use visibility_gate::{VisibilityGate, DEFAULT_MIN_VISIBILITY};
