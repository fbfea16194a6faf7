//! Coach - the application state behind the UI controls
//!
//! Idle ──start(exercise)──▶ Active ──stop()──▶ Idle
//!
//! Owns the workout history (load at startup, persist on mutation) and
//! the live FormState of the active session. Ticks carry the token of the
//! session they were scheduled for; a tick for any other session, or while
//! idle, is dropped so a late timer can never touch discarded state.

use chrono::{DateTime, Utc};

use super::clock::Clock;
use super::history::{HistoryStore, WorkoutHistory, WorkoutSession};
use crate::config::CoachConfig;
use crate::error::FrameError;
use crate::exercise::{ExerciseKind, FeedbackEntry, FormState, Severity, Thresholds, Verdict};
use crate::pose::{Joints, KeypointFrame};

/// Identifies one started session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What a tick did
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Frame classified and folded into the form state
    Classified(Verdict),
    /// Frame unusable (missing landmark, degenerate geometry); state unchanged
    Skipped(FrameError),
    /// No frame available from the pose model yet
    NoFrame,
    /// Token does not belong to the active session
    Stale,
}

struct ActiveSession {
    token: SessionToken,
    exercise: ExerciseKind,
    started_at: DateTime<Utc>,
    form: FormState,
}

pub struct Coach {
    config: CoachConfig,
    joints: Joints,
    store: Box<dyn HistoryStore>,
    clock: Box<dyn Clock>,
    history: WorkoutHistory,
    active: Option<ActiveSession>,
    next_token: u64,
}

impl Coach {
    /// Create the coach and load persisted history
    pub fn new(config: CoachConfig, store: Box<dyn HistoryStore>, clock: Box<dyn Clock>) -> Self {
        let history = WorkoutHistory::load(store.as_ref());
        let joints = config.body_side.joints();
        Self {
            config,
            joints,
            store,
            clock,
            history,
            active: None,
            next_token: 1,
        }
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Begin a session with fresh form state
    ///
    /// Starting while a session is active stops (and records) it first.
    pub fn start(&mut self, exercise: ExerciseKind) -> SessionToken {
        if self.active.is_some() {
            log::info!("Session already active - stopping it before starting {}", exercise.as_str());
            self.stop();
        }

        let token = SessionToken(self.next_token);
        self.next_token += 1;

        self.active = Some(ActiveSession {
            token,
            exercise,
            started_at: self.clock.now(),
            form: FormState::with_feedback_capacity(self.config.feedback_capacity),
        });
        log::info!("Started {} session #{}", exercise.as_str(), token.id());
        token
    }

    /// End the active session and record it; no-op while idle
    pub fn stop(&mut self) -> Option<WorkoutSession> {
        let active = self.active.take()?;
        let ended_at = self.clock.now();

        let Some(session) = WorkoutSession::finished(active.exercise, active.started_at, ended_at) else {
            log::warn!(
                "Session #{} ended at or before its start ({} <= {}), not recorded",
                active.token.id(),
                ended_at,
                active.started_at
            );
            return None;
        };

        log::info!(
            "Stopped {} session #{} after {}s with {} reps",
            session.exercise.as_str(),
            active.token.id(),
            session.duration_seconds,
            active.form.rep_count()
        );
        self.history.append(session.clone());
        self.persist_history();
        Some(session)
    }

    /// Drop the active session without recording it
    pub fn discard(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                log::info!("Discarded {} session #{}", active.exercise.as_str(), active.token.id());
                true
            }
            None => false,
        }
    }

    /// Run one classification tick against the latest frame
    pub fn tick(&mut self, token: SessionToken, frame: Option<&KeypointFrame>) -> TickOutcome {
        let Some(active) = self.active.as_mut().filter(|a| a.token == token) else {
            return TickOutcome::Stale;
        };
        let Some(frame) = frame else {
            return TickOutcome::NoFrame;
        };

        let thresholds = Thresholds::for_exercise(active.exercise);
        match active.form.step(active.exercise, frame, &self.joints, thresholds) {
            Ok(next) => {
                active.form = next;
                match active.form.last_classification() {
                    Some(c) => TickOutcome::Classified(c.verdict),
                    None => TickOutcome::NoFrame,
                }
            }
            Err(e) => {
                log::debug!("Skipping frame: {}", e);
                TickOutcome::Skipped(e)
            }
        }
    }

    /// Camera or pose source failed; shown as an error-severity message
    pub fn report_source_error(&mut self, message: &str) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        log::warn!("Pose source error: {}", message);
        let form = std::mem::take(&mut active.form);
        active.form = form.append_feedback(FeedbackEntry::new(message, Severity::Error));
    }

    /// Delete one history entry by id
    pub fn delete_session(&mut self, id: &str) -> bool {
        if !self.history.delete(id) {
            return false;
        }
        self.persist_history();
        true
    }

    pub fn history(&self) -> &WorkoutHistory {
        &self.history
    }

    pub fn form_state(&self) -> Option<&FormState> {
        self.active.as_ref().map(|a| &a.form)
    }

    pub fn active_exercise(&self) -> Option<ExerciseKind> {
        self.active.as_ref().map(|a| a.exercise)
    }

    pub fn active_token(&self) -> Option<SessionToken> {
        self.active.as_ref().map(|a| a.token)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whole seconds since the active session started, 0 while idle
    pub fn elapsed_seconds(&self) -> u64 {
        self.active
            .as_ref()
            .map(|a| (self.clock.now() - a.started_at).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    fn persist_history(&self) {
        if let Err(e) = self.history.persist(self.store.as_ref()) {
            log::warn!("Failed to save workout history: {}", e);
        }
    }
}
