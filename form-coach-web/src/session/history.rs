//! Workout history - finished sessions, persisted as JSON
//!
//! Best-effort local state: loaded once at startup, rewritten on every
//! append or delete. Missing or corrupt data loads as an empty history.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timer::format_duration;
use crate::error::StorageError;
use crate::exercise::ExerciseKind;

/// One finished workout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub exercise: ExerciseKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
}

impl WorkoutSession {
    /// Build a session with a fresh id; `None` unless end > start
    pub fn finished(exercise: ExerciseKind, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Option<Self> {
        if end_time <= start_time {
            return None;
        }
        // Whole seconds, rounded down
        let duration_seconds = (end_time - start_time).num_seconds().max(0) as u64;

        Some(Self {
            id: Uuid::new_v4().to_string(),
            exercise,
            start_time,
            end_time,
            duration_seconds,
        })
    }

    /// "M:SS" as shown in the history list
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_seconds)
    }
}

/// Raw key-value storage for the serialized history
pub trait HistoryStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, data: &str) -> Result<(), StorageError>;
}

/// In-memory store, used when the browser has no localStorage
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: RefCell::new(Some(data.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, data: &str) -> Result<(), StorageError> {
        *self.data.borrow_mut() = Some(data.to_string());
        Ok(())
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for std::rc::Rc<S> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&self, data: &str) -> Result<(), StorageError> {
        (**self).save(data)
    }
}

/// Ordered list of finished sessions, oldest first
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkoutHistory {
    sessions: Vec<WorkoutSession>,
}

impl WorkoutHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the store, falling back to empty on any failure
    pub fn load(store: &dyn HistoryStore) -> Self {
        let raw = match store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                log::warn!("Workout history unavailable, starting empty: {}", e);
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<WorkoutSession>>(&raw) {
            Ok(sessions) => {
                log::debug!("Loaded {} workout sessions", sessions.len());
                Self { sessions }
            }
            Err(e) => {
                log::warn!("Discarding corrupt workout history: {}", e);
                Self::new()
            }
        }
    }

    pub fn persist(&self, store: &dyn HistoryStore) -> Result<(), StorageError> {
        let data = serde_json::to_string(&self.sessions)?;
        store.save(&data)
    }

    pub fn append(&mut self, session: WorkoutSession) {
        self.sessions.push(session);
    }

    /// Remove the entry with `id`; returns false if none matched
    pub fn delete(&mut self, id: &str) -> bool {
        match self.sessions.iter().position(|s| s.id == id) {
            Some(index) => {
                self.sessions.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&WorkoutSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkoutSession> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn session_at(minute: u32, exercise: ExerciseKind) -> WorkoutSession {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap();
        WorkoutSession::finished(exercise, start, start + Duration::seconds(42)).unwrap()
    }

    #[test]
    fn test_duration_floors_to_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let end = start + Duration::milliseconds(65_999);
        let session = WorkoutSession::finished(ExerciseKind::Squat, start, end).unwrap();
        assert_eq!(session.duration_seconds, 65);
        assert_eq!(session.duration_label(), "1:05");
    }

    #[test]
    fn test_end_must_follow_start() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        assert!(WorkoutSession::finished(ExerciseKind::Pushup, start, start).is_none());
        assert!(WorkoutSession::finished(ExerciseKind::Pushup, start, start - Duration::seconds(1)).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = session_at(0, ExerciseKind::Squat);
        let b = session_at(0, ExerciseKind::Squat);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_delete_keeps_order_of_others() {
        let mut history = WorkoutHistory::new();
        let sessions: Vec<WorkoutSession> = (0..4).map(|m| session_at(m, ExerciseKind::Squat)).collect();
        for s in &sessions {
            history.append(s.clone());
        }

        assert!(history.delete(&sessions[1].id));
        let ids: Vec<&str> = history.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, [sessions[0].id.as_str(), sessions[2].id.as_str(), sessions[3].id.as_str()]);

        assert!(!history.delete("no-such-id"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_persist_and_reload() {
        let store = MemoryStore::new();
        let mut history = WorkoutHistory::new();
        history.append(session_at(5, ExerciseKind::Pushup));
        history.persist(&store).unwrap();

        let reloaded = WorkoutHistory::load(&store);
        assert_eq!(reloaded, history);
    }

    #[test]
    fn test_wire_format() {
        let store = MemoryStore::new();
        let mut history = WorkoutHistory::new();
        let mut session = session_at(0, ExerciseKind::Pushup);
        session.id = "1709283600000".to_string();
        history.append(session);
        history.persist(&store).unwrap();

        assert_eq!(
            store.contents().unwrap(),
            r#"[{"id":"1709283600000","exercise":"pushup","startTime":"2024-03-01T09:00:00Z","endTime":"2024-03-01T09:00:42Z","duration":42}]"#
        );
    }

    #[test]
    fn test_reads_js_iso_timestamps() {
        let store = MemoryStore::with_data(
            r#"[{"id":"1","exercise":"squat","startTime":"2024-03-01T09:00:00.000Z","endTime":"2024-03-01T09:01:05.000Z","duration":65}]"#,
        );
        let history = WorkoutHistory::load(&store);
        assert_eq!(history.len(), 1);
        assert_eq!(history.get("1").map(|s| s.duration_seconds), Some(65));
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        for raw in ["not json", "{\"id\":1}", "[{\"exercise\":\"lunge\"}]"] {
            let store = MemoryStore::with_data(raw);
            assert!(WorkoutHistory::load(&store).is_empty());
        }
    }

    #[test]
    fn test_missing_data_loads_empty() {
        assert!(WorkoutHistory::load(&MemoryStore::new()).is_empty());
    }
}
