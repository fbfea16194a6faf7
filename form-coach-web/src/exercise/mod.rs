//! Exercise module - form rules, rep counting and coaching feedback
//!
//! Pure logic only; no browser calls. The bridge feeds frames in.

mod kind;
mod thresholds;
mod rules;
mod rep_counter;
mod feedback;
mod form_state;

pub use kind::ExerciseKind;
pub use thresholds::{AngleRange, Thresholds, SQUAT_THRESHOLDS, PUSHUP_THRESHOLDS};
pub use rules::{classify, evaluate, measure, Classification, JointAngles, Verdict};
pub use rep_counter::{RepCounter, Stance};
pub use feedback::{FeedbackEntry, FeedbackLog, Severity, FEEDBACK_CAPACITY};
pub use form_state::{FormSnapshot, FormState};
