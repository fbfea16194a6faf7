//! Form rules - maps one keypoint frame to a form verdict
//!
//! Checks run in strict priority order, first match wins:
//! 1. limiting joint below min  (too bent)
//! 2. limiting joint above max  (too extended)
//! 3. torso joint below min
//! 4. torso joint above max
//! 5. good form
//!
//! The rep counter relies on this order: a frame that is "too bent"
//! never also reports a torso problem in the same tick.

use serde::Serialize;

use super::kind::ExerciseKind;
use super::thresholds::Thresholds;
use crate::error::FrameError;
use crate::pose::{angle_at_vertex, Joints, KeypointFrame};

/// Which rule fired for a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// Limiting joint below min (bottom of the rep)
    TooBent,
    /// Limiting joint above max (top of the rep)
    TooExtended,
    /// Torso joint below min
    TorsoTooClosed,
    /// Torso joint above max
    TorsoTooOpen,
    Good,
}

/// Joint angles measured for one frame (degrees)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct JointAngles {
    /// Knee for squat, elbow for push-up
    pub limiting: f32,
    /// Hip for squat, shoulder for push-up
    pub torso: f32,
}

/// Result of classifying one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub exercise: ExerciseKind,
    pub verdict: Verdict,
    pub angles: JointAngles,
}

impl Classification {
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Good
    }

    pub fn feedback(&self) -> &'static str {
        self.exercise.message(self.verdict)
    }
}

/// Measure the two joint angles the exercise is judged on
pub fn measure(
    exercise: ExerciseKind,
    frame: &KeypointFrame,
    joints: &Joints,
) -> Result<JointAngles, FrameError> {
    let shoulder = frame.get(joints.shoulder)?;
    let hip = frame.get(joints.hip)?;

    let angles = match exercise {
        ExerciseKind::Squat => {
            let knee = frame.get(joints.knee)?;
            let ankle = frame.get(joints.ankle)?;
            JointAngles {
                limiting: angle_at_vertex(hip, knee, ankle)?,
                torso: angle_at_vertex(shoulder, hip, knee)?,
            }
        }
        ExerciseKind::Pushup => {
            let elbow = frame.get(joints.elbow)?;
            let wrist = frame.get(joints.wrist)?;
            JointAngles {
                limiting: angle_at_vertex(shoulder, elbow, wrist)?,
                torso: angle_at_vertex(elbow, shoulder, hip)?,
            }
        }
    };
    Ok(angles)
}

/// Apply the priority-ordered rules to already-measured angles
pub fn evaluate(exercise: ExerciseKind, angles: JointAngles, thresholds: &Thresholds) -> Classification {
    let verdict = if angles.limiting < thresholds.limiting.min {
        Verdict::TooBent
    } else if angles.limiting > thresholds.limiting.max {
        Verdict::TooExtended
    } else if angles.torso < thresholds.torso.min {
        Verdict::TorsoTooClosed
    } else if angles.torso > thresholds.torso.max {
        Verdict::TorsoTooOpen
    } else {
        Verdict::Good
    };

    Classification {
        exercise,
        verdict,
        angles,
    }
}

/// Classify one frame
///
/// Fails when a required landmark is absent or the geometry is
/// degenerate; callers skip the frame in that case.
pub fn classify(
    exercise: ExerciseKind,
    frame: &KeypointFrame,
    joints: &Joints,
    thresholds: &Thresholds,
) -> Result<Classification, FrameError> {
    let angles = measure(exercise, frame, joints)?;
    Ok(evaluate(exercise, angles, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::exercise::{PUSHUP_THRESHOLDS, SQUAT_THRESHOLDS};
    use crate::pose::{BodySide, Point3D, RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST};

    fn squat(limiting: f32, torso: f32) -> Classification {
        evaluate(ExerciseKind::Squat, JointAngles { limiting, torso }, &SQUAT_THRESHOLDS)
    }

    fn pushup(limiting: f32, torso: f32) -> Classification {
        evaluate(ExerciseKind::Pushup, JointAngles { limiting, torso }, &PUSHUP_THRESHOLDS)
    }

    /// Point 0.2 away from `origin` at `deg` degrees from +x (x/y plane)
    fn polar(origin: Point3D, deg: f32) -> Point3D {
        let rad = deg.to_radians();
        Point3D::new(origin.x + 0.2 * rad.cos(), origin.y + 0.2 * rad.sin(), origin.z)
    }

    #[test]
    fn test_squat_too_extended() {
        let c = squat(170.1, 100.0);
        assert!(!c.is_correct());
        assert_eq!(c.verdict, Verdict::TooExtended);
        assert_eq!(c.feedback(), "Bend your knees more");
    }

    #[test]
    fn test_squat_good_form() {
        let c = squat(90.0, 100.0);
        assert!(c.is_correct());
        assert_eq!(c.feedback(), "Good form!");
    }

    #[test]
    fn test_squat_priority_order() {
        // Knee rule wins over a simultaneous hip violation
        assert_eq!(squat(50.0, 20.0).verdict, Verdict::TooBent);
        assert_eq!(squat(175.0, 170.0).verdict, Verdict::TooExtended);
        assert_eq!(squat(90.0, 40.0).feedback(), "Keep your back straighter");
        assert_eq!(squat(90.0, 165.0).feedback(), "Bend at your hips more");
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(squat(60.0, 50.0).is_correct());
        assert!(squat(170.0, 160.0).is_correct());
        assert!(pushup(70.0, 40.0).is_correct());
        assert!(pushup(160.0, 90.0).is_correct());
    }

    #[test]
    fn test_pushup_messages() {
        assert_eq!(pushup(60.0, 60.0).feedback(), "Arms too bent - push up more");
        assert_eq!(pushup(165.0, 60.0).feedback(), "Lower yourself more");
        assert_eq!(pushup(100.0, 30.0).feedback(), "Keep your upper body higher");
        assert_eq!(pushup(100.0, 95.0).feedback(), "Lower your upper body");
        assert!(pushup(100.0, 60.0).is_correct());
    }

    #[test]
    fn test_classify_squat_frame() {
        // Knee at 90°, hip at 100°
        let knee = Point3D::new(0.5, 0.6, 0.0);
        let ankle = polar(knee, 270.0);
        let hip = polar(knee, 180.0);
        let shoulder = polar(hip, 100.0);
        let frame = KeypointFrame::empty()
            .with_landmark(RIGHT_HIP, hip)
            .with_landmark(RIGHT_KNEE, knee)
            .with_landmark(RIGHT_ANKLE, ankle)
            .with_landmark(RIGHT_SHOULDER, shoulder);

        let c = classify(ExerciseKind::Squat, &frame, &BodySide::Right.joints(), &SQUAT_THRESHOLDS).unwrap();
        assert!((c.angles.limiting - 90.0).abs() < 0.01);
        assert!((c.angles.torso - 100.0).abs() < 0.01);
        assert!(c.is_correct());
    }

    #[test]
    fn test_classify_missing_landmark() {
        let frame = KeypointFrame::empty()
            .with_landmark(RIGHT_SHOULDER, Point3D::new(0.5, 0.2, 0.0))
            .with_landmark(RIGHT_HIP, Point3D::new(0.5, 0.5, 0.0));
        let result = classify(ExerciseKind::Pushup, &frame, &BodySide::Right.joints(), &PUSHUP_THRESHOLDS);
        assert_eq!(result, Err(FrameError::MissingLandmark { index: RIGHT_ELBOW }));
    }

    #[test]
    fn test_classify_degenerate_frame() {
        let p = Point3D::new(0.5, 0.5, 0.0);
        let frame = KeypointFrame::empty()
            .with_landmark(RIGHT_SHOULDER, p)
            .with_landmark(RIGHT_ELBOW, p)
            .with_landmark(RIGHT_WRIST, Point3D::new(0.7, 0.5, 0.0))
            .with_landmark(RIGHT_HIP, Point3D::new(0.5, 0.9, 0.0));
        let result = classify(ExerciseKind::Pushup, &frame, &BodySide::Right.joints(), &PUSHUP_THRESHOLDS);
        assert_eq!(result, Err(FrameError::Geometry(GeometryError::Degenerate)));
    }
}
