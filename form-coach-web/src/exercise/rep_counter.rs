//! Rep counting with hysteresis on the limiting joint
//!
//! Up ──(TooBent)──▶ Down ──(TooExtended, +1 rep)──▶ Up
//!
//! Only the limiting-joint verdicts move the machine. Torso verdicts and
//! good form leave it untouched, so a rep counts regardless of torso
//! feedback. Min and Max are far apart, so jitter around either one
//! cannot produce a second transition.

use serde::Serialize;

use super::rules::Verdict;

/// Position within the current rep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    #[default]
    Up,
    Down,
}

/// Down→up state machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepCounter {
    rep_count: u32,
    stance: Stance,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's verdict; returns true when a rep completed
    pub fn observe(&mut self, verdict: Verdict) -> bool {
        match (self.stance, verdict) {
            (Stance::Up, Verdict::TooBent) => {
                self.stance = Stance::Down;
                false
            }
            (Stance::Down, Verdict::TooExtended) => {
                self.stance = Stance::Up;
                self.rep_count = self.rep_count.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_in_down_position(&self) -> bool {
        self.stance == Stance::Down
    }
}
