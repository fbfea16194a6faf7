//! Visibility gate - drops landmarks the pose model is unsure about
//!
//! When a landmark's visibility < threshold it is treated as absent,
//! so the frame is skipped instead of classified from a guessed joint.

/// Default minimum visibility to accept a landmark
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

/// Visibility gate applied to every landmark of a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityGate {
    /// Minimum visibility to accept raw data
    threshold: f32,
}

impl VisibilityGate {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Set visibility threshold
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Frames without visibility scores are always accepted
    pub fn accepts(&self, visibility: Option<f32>) -> bool {
        match visibility {
            Some(v) => v.is_finite() && v >= self.threshold,
            None => true,
        }
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VISIBILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let gate = VisibilityGate::new(0.5);
        assert!(gate.accepts(Some(0.5)));
        assert!(!gate.accepts(Some(0.49)));
        assert!(!gate.accepts(Some(f32::NAN)));
        assert!(gate.accepts(None));
    }

    #[test]
    fn test_threshold_clamped() {
        let mut gate = VisibilityGate::default();
        gate.set_threshold(3.0);
        assert_eq!(gate.threshold(), 1.0);
    }
}
