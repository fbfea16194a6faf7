//! Form Coach Web - exercise form feedback and rep counting
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! MediaPipe Pose runs in JavaScript and pushes landmarks through
//! `update_landmarks`; everything below `bridge` is browser-free.

pub mod bridge;
pub mod config;
pub mod error;
pub mod exercise;
pub mod pose;
pub mod session;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    update_landmarks, clear_landmarks, get_pose_connections, get_frames_received,
    start_exercise, stop_exercise, report_source_error, delete_session,
    get_form_state, get_history, get_elapsed_time, get_active_exercise,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize logging, load workout history - must be called before start_exercise
///
/// `config` is optional, e.g. `init({ tickMode: "frameArrival", bodySide: "left" })`.
#[wasm_bindgen]
pub fn init(config: JsValue) -> Result<(), JsValue> {
    bridge::init_coach(config)?;
    Ok(())
}

/// Library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
