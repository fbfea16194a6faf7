//! Coach controls - session start/stop, history and state queries
//!
//! Holds the single Coach instance and the active tick interval.
//! Stopping cancels the interval before the session is torn down.

use std::cell::RefCell;
use std::sync::Once;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::landmarks::{latest_frame, set_min_visibility};
use super::storage::LocalStorageStore;
use super::ticker::IntervalTicker;
use crate::config::{CoachConfig, TickMode};
use crate::error::CoachError;
use crate::exercise::ExerciseKind;
use crate::session::{format_clock, Coach, HistoryStore, MemoryStore, SessionToken, SystemClock, WorkoutSession};

thread_local! {
    static COACH: RefCell<Option<Coach>> = RefCell::new(None);
    static TICKER: RefCell<Option<IntervalTicker>> = RefCell::new(None);
}

static LOGGER: Once = Once::new();

/// Install the console logger once; later calls only change the level
fn init_logging(level: log::Level) {
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::new(log::Level::Trace)));
    log::set_max_level(level.to_level_filter());
}

fn with_coach<R>(f: impl FnOnce(&mut Coach) -> R) -> Result<R, CoachError> {
    COACH.with(|cell| cell.borrow_mut().as_mut().map(f).ok_or(CoachError::NotInitialized))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Cancel the running interval, if any, before returning
fn cancel_ticker() {
    if let Some(ticker) = TICKER.with(|cell| cell.borrow_mut().take()) {
        ticker.cancel();
    }
}

fn run_tick(token: SessionToken) {
    let frame = latest_frame();
    // Ignore NotInitialized: nothing to tick
    let _ = with_coach(|coach| coach.tick(token, frame.as_ref()));
}

/// Frame-arrival mode: one tick per landmark update
pub(super) fn on_frame_arrival() {
    let token = COACH.with(|cell| {
        cell.borrow()
            .as_ref()
            .filter(|coach| coach.config().tick_mode == TickMode::FrameArrival)
            .and_then(|coach| coach.active_token())
    });
    if let Some(token) = token {
        run_tick(token);
    }
}

/// History row with display labels for the UI
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRow<'a> {
    #[serde(flatten)]
    session: &'a WorkoutSession,
    exercise_name: &'static str,
    duration_label: String,
}

impl<'a> From<&'a WorkoutSession> for HistoryRow<'a> {
    fn from(session: &'a WorkoutSession) -> Self {
        Self {
            session,
            exercise_name: session.exercise.display_name(),
            duration_label: session.duration_label(),
        }
    }
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Create the coach and load workout history
///
/// `config` is an optional JS object; see `CoachConfig` for fields.
/// Re-initializing stops and records any running session first.
pub fn init_coach(config: JsValue) -> Result<(), CoachError> {
    let config: CoachConfig = if config.is_undefined() || config.is_null() {
        CoachConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| CoachError::Config(e.to_string()))?
    };
    config.validate().map_err(CoachError::Config)?;

    init_logging(config.log_level());

    // Record the previous coach's session before its history is reloaded
    cancel_ticker();
    if let Ok(Some(session)) = with_coach(|coach| coach.stop()) {
        log::info!("Re-init: recorded running {} session", session.exercise.as_str());
    }

    let store: Box<dyn HistoryStore> = match LocalStorageStore::open(&config.history_key) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{} - history will not survive reload", e);
            Box::new(MemoryStore::new())
        }
    };

    set_min_visibility(config.min_visibility);
    let coach = Coach::new(config, store, Box::new(SystemClock));
    log::info!("Coach ready ({} sessions in history)", coach.history().len());
    COACH.with(|cell| *cell.borrow_mut() = Some(coach));
    Ok(())
}

/// Start a session ("squat" or "pushup")
#[wasm_bindgen]
pub fn start_exercise(exercise: &str) -> Result<(), JsValue> {
    let kind = ExerciseKind::from_tag(exercise).ok_or_else(|| CoachError::UnknownExercise(exercise.to_string()))?;

    // Old interval must be gone before the old session is stopped
    cancel_ticker();
    let (token, config) = with_coach(|coach| (coach.start(kind), coach.config().clone()))?;

    if config.tick_mode == TickMode::Interval {
        let ticker = IntervalTicker::start(config.tick_period_ms, move || run_tick(token));
        match ticker {
            Ok(ticker) => TICKER.with(|cell| *cell.borrow_mut() = Some(ticker)),
            Err(e) => {
                // Roll back without recording: the session never ticked
                let _ = with_coach(|coach| coach.discard());
                return Err(e.into());
            }
        }
    }
    Ok(())
}

/// Stop the session; returns the recorded session or null
#[wasm_bindgen]
pub fn stop_exercise() -> Result<JsValue, JsValue> {
    cancel_ticker();
    let session = with_coach(|coach| coach.stop())?;
    Ok(session.as_ref().map_or(JsValue::NULL, to_js))
}

/// Report a camera / pose model failure to the user
#[wasm_bindgen]
pub fn report_source_error(message: &str) -> Result<(), JsValue> {
    with_coach(|coach| coach.report_source_error(message))?;
    Ok(())
}

/// Delete one history entry; returns false if the id is unknown
#[wasm_bindgen]
pub fn delete_session(id: &str) -> Result<bool, JsValue> {
    Ok(with_coach(|coach| coach.delete_session(id))?)
}

/// Live form state, or null when no session is active
#[wasm_bindgen]
pub fn get_form_state() -> Result<JsValue, JsValue> {
    Ok(with_coach(|coach| {
        coach
            .form_state()
            .map_or(JsValue::NULL, |form| to_js(&form.snapshot()))
    })?)
}

/// Workout history, oldest first
#[wasm_bindgen]
pub fn get_history() -> Result<JsValue, JsValue> {
    Ok(with_coach(|coach| {
        let rows: Vec<HistoryRow> = coach.history().iter().map(HistoryRow::from).collect();
        to_js(&rows)
    })?)
}

/// Live timer text, "MM:SS"
#[wasm_bindgen]
pub fn get_elapsed_time() -> Result<String, JsValue> {
    Ok(with_coach(|coach| format_clock(coach.elapsed_seconds()))?)
}

#[wasm_bindgen]
pub fn get_active_exercise() -> Option<String> {
    with_coach(|coach| coach.active_exercise().map(|kind| kind.as_str().to_string()))
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::update_landmarks;
    use crate::pose::{LANDMARK_COUNT, RIGHT_ANKLE, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER};

    fn install(tick_mode: TickMode) {
        let config = CoachConfig {
            tick_mode,
            ..CoachConfig::default()
        };
        let coach = Coach::new(config, Box::new(MemoryStore::new()), Box::new(SystemClock));
        COACH.with(|cell| *cell.borrow_mut() = Some(coach));
    }

    /// Flat 99-value right-side squat frame with the given knee angle
    fn squat_flat(knee_angle: f32) -> Vec<f32> {
        let mut data = vec![0.0; LANDMARK_COUNT * 3];
        let mut put = |index: usize, x: f32, y: f32| {
            data[index * 3] = x;
            data[index * 3 + 1] = y;
        };
        let (knee_x, knee_y) = (0.5, 0.6);
        let (hip_x, hip_y) = (0.3, 0.6);
        let ankle = (180.0 + knee_angle).to_radians();
        let shoulder = 100f32.to_radians();
        put(RIGHT_KNEE, knee_x, knee_y);
        put(RIGHT_HIP, hip_x, hip_y);
        put(RIGHT_ANKLE, knee_x + 0.2 * ankle.cos(), knee_y + 0.2 * ankle.sin());
        put(RIGHT_SHOULDER, hip_x + 0.2 * shoulder.cos(), hip_y + 0.2 * shoulder.sin());
        data
    }

    fn rep_count() -> Option<u32> {
        with_coach(|coach| coach.form_state().map(|form| form.rep_count()))
            .ok()
            .flatten()
    }

    #[test]
    fn test_frame_arrival_ticks_active_session() {
        install(TickMode::FrameArrival);
        with_coach(|coach| coach.start(ExerciseKind::Squat)).unwrap();

        update_landmarks(&squat_flat(50.0));
        assert_eq!(rep_count(), Some(0));
        assert_eq!(with_coach(|coach| coach.form_state().map(|f| f.is_in_down_position())).unwrap(), Some(true));

        update_landmarks(&squat_flat(175.0));
        assert_eq!(rep_count(), Some(1));

        update_landmarks(&squat_flat(50.0));
        update_landmarks(&squat_flat(175.0));
        assert_eq!(rep_count(), Some(2));
    }

    #[test]
    fn test_frame_arrival_ignored_in_interval_mode() {
        install(TickMode::Interval);
        with_coach(|coach| coach.start(ExerciseKind::Squat)).unwrap();

        for knee in [50.0, 175.0, 50.0, 175.0] {
            update_landmarks(&squat_flat(knee));
        }
        let untouched = with_coach(|coach| {
            coach
                .form_state()
                .map(|form| (form.rep_count(), form.is_in_down_position(), form.recent_feedback().is_empty()))
        })
        .unwrap();
        assert_eq!(untouched, Some((0, false, true)));
    }

    #[test]
    fn test_frame_arrival_while_idle_is_noop() {
        install(TickMode::FrameArrival);
        update_landmarks(&squat_flat(50.0));
        assert_eq!(rep_count(), None);
        assert!(with_coach(|coach| coach.history().is_empty()).unwrap());
    }
}
