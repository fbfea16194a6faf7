//! Periodic classification tick on `setInterval`
//!
//! Dropping the ticker clears the interval before returning, so no
//! callback can fire for a session that has been torn down.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::CoachError;

pub struct IntervalTicker {
    interval_id: i32,
    // Must outlive the interval; freed on drop after clearInterval
    _callback: Closure<dyn FnMut()>,
}

impl IntervalTicker {
    pub fn start(period_ms: u32, mut on_tick: impl FnMut() + 'static) -> Result<Self, CoachError> {
        let window = web_sys::window().ok_or_else(|| CoachError::Scheduler("no window".to_string()))?;

        let callback = Closure::wrap(Box::new(move || on_tick()) as Box<dyn FnMut()>);
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let interval_id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), timeout)
            .map_err(|e| CoachError::Scheduler(format!("{:?}", e)))?;

        log::debug!("Tick interval {} started ({} ms)", interval_id, period_ms);
        Ok(Self {
            interval_id,
            _callback: callback,
        })
    }

    /// Stop ticking; equivalent to dropping
    pub fn cancel(self) {}
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.interval_id);
            log::debug!("Tick interval {} cleared", self.interval_id);
        }
    }
}
