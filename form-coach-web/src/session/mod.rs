//! Session module - workout lifecycle, timing and persisted history
//!
//! Re-exports only. All logic in submodules.

mod clock;
mod coach;
mod history;
mod timer;

pub use clock::{Clock, SystemClock};
pub use coach::{Coach, SessionToken, TickOutcome};
pub use history::{HistoryStore, MemoryStore, WorkoutHistory, WorkoutSession};
pub use timer::{format_clock, format_duration};
