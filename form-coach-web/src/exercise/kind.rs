//! Exercise kinds and their per-verdict coaching messages

use serde::{Deserialize, Serialize};

use super::rules::Verdict;

/// Exercise selected for a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Squat,
    Pushup,
}

impl ExerciseKind {
    /// Parse the tag used by the UI and in stored history
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "squat" => Some(ExerciseKind::Squat),
            "pushup" => Some(ExerciseKind::Pushup),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
        }
    }

    /// Label for the history list
    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squats",
            ExerciseKind::Pushup => "Push-ups",
        }
    }

    /// Feedback shown for each verdict
    pub fn message(&self, verdict: Verdict) -> &'static str {
        match (self, verdict) {
            (ExerciseKind::Squat, Verdict::TooBent) => "Knees too bent - rise up slightly",
            (ExerciseKind::Squat, Verdict::TooExtended) => "Bend your knees more",
            (ExerciseKind::Squat, Verdict::TorsoTooClosed) => "Keep your back straighter",
            (ExerciseKind::Squat, Verdict::TorsoTooOpen) => "Bend at your hips more",
            (ExerciseKind::Pushup, Verdict::TooBent) => "Arms too bent - push up more",
            (ExerciseKind::Pushup, Verdict::TooExtended) => "Lower yourself more",
            (ExerciseKind::Pushup, Verdict::TorsoTooClosed) => "Keep your upper body higher",
            (ExerciseKind::Pushup, Verdict::TorsoTooOpen) => "Lower your upper body",
            (_, Verdict::Good) => "Good form!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for kind in [ExerciseKind::Squat, ExerciseKind::Pushup] {
            assert_eq!(ExerciseKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(ExerciseKind::from_tag(" Pushup "), Some(ExerciseKind::Pushup));
        assert_eq!(ExerciseKind::from_tag("lunge"), None);
    }

    #[test]
    fn test_serde_tag_matches_as_str() {
        let json = serde_json::to_string(&ExerciseKind::Pushup).unwrap();
        assert_eq!(json, "\"pushup\"");
    }
}
