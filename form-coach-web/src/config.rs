//! Coach configuration, passed from JavaScript to `init`
//!
//! Every field is optional on the JS side; missing fields take defaults.

use serde::{Deserialize, Serialize};

use crate::exercise::FEEDBACK_CAPACITY;
use crate::pose::{BodySide, DEFAULT_MIN_VISIBILITY};

/// localStorage key holding the workout history JSON
pub const DEFAULT_HISTORY_KEY: &str = "workoutSessions";

/// What drives the classification tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickMode {
    /// Fixed `setInterval` period against the latest frame
    #[default]
    Interval,
    /// One tick per landmark update from the pose model
    FrameArrival,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoachConfig {
    pub tick_mode: TickMode,
    pub tick_period_ms: u32,
    /// Landmarks below this visibility count as missing
    pub min_visibility: f32,
    pub body_side: BodySide,
    pub feedback_capacity: usize,
    pub history_key: String,
    pub log_level: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            tick_mode: TickMode::Interval,
            tick_period_ms: 1000,
            min_visibility: DEFAULT_MIN_VISIBILITY,
            body_side: BodySide::Right,
            feedback_capacity: FEEDBACK_CAPACITY,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl CoachConfig {
    /// Reject values the tick loop or storage cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_period_ms == 0 {
            return Err("tickPeriodMs must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(format!("minVisibility {} outside 0..=1", self.min_visibility));
        }
        if self.history_key.trim().is_empty() {
            return Err("historyKey must not be empty".to_string());
        }
        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => log::Level::Trace,
            "debug" => log::Level::Debug,
            "warn" => log::Level::Warn,
            "error" => log::Level::Error,
            _ => log::Level::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: CoachConfig =
            serde_json::from_str(r#"{"tickMode":"frameArrival","bodySide":"left"}"#).unwrap();
        assert_eq!(config.tick_mode, TickMode::FrameArrival);
        assert_eq!(config.body_side, BodySide::Left);
        assert_eq!(config.tick_period_ms, 1000);
        assert_eq!(config.feedback_capacity, 3);
        assert_eq!(config.history_key, "workoutSessions");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_period() {
        let config = CoachConfig {
            tick_period_ms: 0,
            ..CoachConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_fallback() {
        let config = CoachConfig {
            log_level: "verbose".to_string(),
            ..CoachConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
