//! Angle thresholds per exercise (degrees)
//!
//! Min/Max of the limiting joint form the rep-counting hysteresis band.

use serde::Serialize;

use super::kind::ExerciseKind;

/// Acceptable range for one joint angle
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

impl AngleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Thresholds for one exercise
///
/// - `limiting`: the joint that defines a rep (knee for squat, elbow for push-up)
/// - `torso`: the posture joint (hip for squat, shoulder for push-up)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Thresholds {
    pub limiting: AngleRange,
    pub torso: AngleRange,
}

/// Squat: knee 60-170°, hip 50-160°
pub const SQUAT_THRESHOLDS: Thresholds = Thresholds {
    limiting: AngleRange::new(60.0, 170.0),
    torso: AngleRange::new(50.0, 160.0),
};

/// Push-up: elbow 70-160°, shoulder 40-90°
pub const PUSHUP_THRESHOLDS: Thresholds = Thresholds {
    limiting: AngleRange::new(70.0, 160.0),
    torso: AngleRange::new(40.0, 90.0),
};

impl Thresholds {
    pub fn for_exercise(exercise: ExerciseKind) -> &'static Thresholds {
        match exercise {
            ExerciseKind::Squat => &SQUAT_THRESHOLDS,
            ExerciseKind::Pushup => &PUSHUP_THRESHOLDS,
        }
    }
}
