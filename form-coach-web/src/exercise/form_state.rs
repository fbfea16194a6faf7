//! Per-session form state and the per-frame step function
//!
//! `step` is pure: (FormState, KeypointFrame) -> FormState'. A frame that
//! cannot be classified returns an error and the caller keeps the old state.

use serde::Serialize;

use super::feedback::{FeedbackEntry, FeedbackLog, Severity};
use super::kind::ExerciseKind;
use super::rep_counter::RepCounter;
use super::rules::{classify, Classification, JointAngles, Verdict};
use super::thresholds::Thresholds;
use crate::error::FrameError;
use crate::pose::{Joints, KeypointFrame};

/// Live state of one exercise session
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    counter: RepCounter,
    is_correct_form: bool,
    recent_feedback: FeedbackLog,
    last_classification: Option<Classification>,
}

/// Read-only view sent to the UI
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot<'a> {
    pub rep_count: u32,
    pub is_in_down_position: bool,
    pub is_correct_form: bool,
    pub recent_feedback: &'a FeedbackLog,
    /// Angles of the last classified frame
    pub angles: Option<JointAngles>,
}

impl FormState {
    pub fn new() -> Self {
        Self::with_feedback_capacity(super::feedback::FEEDBACK_CAPACITY)
    }

    pub fn with_feedback_capacity(capacity: usize) -> Self {
        Self {
            counter: RepCounter::new(),
            is_correct_form: true,
            recent_feedback: FeedbackLog::with_capacity(capacity),
            last_classification: None,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.counter.rep_count()
    }

    pub fn is_in_down_position(&self) -> bool {
        self.counter.is_in_down_position()
    }

    pub fn is_correct_form(&self) -> bool {
        self.is_correct_form
    }

    pub fn recent_feedback(&self) -> &FeedbackLog {
        &self.recent_feedback
    }

    pub fn last_classification(&self) -> Option<&Classification> {
        self.last_classification.as_ref()
    }

    pub fn snapshot(&self) -> FormSnapshot<'_> {
        FormSnapshot {
            rep_count: self.rep_count(),
            is_in_down_position: self.is_in_down_position(),
            is_correct_form: self.is_correct_form,
            recent_feedback: &self.recent_feedback,
            angles: self.last_classification.map(|c| c.angles),
        }
    }

    /// Append one feedback entry; every other field is untouched
    pub fn append_feedback(mut self, entry: FeedbackEntry) -> Self {
        self.recent_feedback.push(entry);
        self
    }

    /// Fold one classification into the state
    pub fn apply(mut self, classification: &Classification) -> Self {
        self.counter.observe(classification.verdict);
        self.is_correct_form = classification.is_correct();
        self.last_classification = Some(*classification);

        let severity = match classification.verdict {
            Verdict::Good => Severity::Success,
            _ => Severity::Warning,
        };
        self.append_feedback(FeedbackEntry::new(classification.feedback(), severity))
    }

    /// Classify `frame` and return the next state
    pub fn step(
        &self,
        exercise: ExerciseKind,
        frame: &KeypointFrame,
        joints: &Joints,
        thresholds: &Thresholds,
    ) -> Result<FormState, FrameError> {
        let classification = classify(exercise, frame, joints, thresholds)?;
        Ok(self.clone().apply(&classification))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
