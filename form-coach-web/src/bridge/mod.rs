//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod coach;
mod storage;
mod ticker;

pub use landmarks::{
    // WASM entry points
    update_landmarks,
    clear_landmarks,
    get_pose_connections,
    get_frames_received,
    // Internal API
    latest_frame,
    set_min_visibility,
};

pub use coach::{
    // WASM entry points
    start_exercise,
    stop_exercise,
    report_source_error,
    delete_session,
    get_form_state,
    get_history,
    get_elapsed_time,
    get_active_exercise,
    // Internal API
    init_coach,
};

pub use storage::LocalStorageStore;
pub use ticker::IntervalTicker;
