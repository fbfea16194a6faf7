//! Landmark storage and JS bridge
//!
//! Receives MediaPipe landmarks from JavaScript and keeps only the most
//! recent frame for the classification tick to read.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::pose::{KeypointFrame, VisibilityGate, POSE_CONNECTIONS};

/// Latest frame from the pose model
#[derive(Default)]
struct LandmarkStore {
    frame: Option<KeypointFrame>,
    gate: VisibilityGate,
    frames_received: u64,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static LANDMARKS: RefCell<LandmarkStore> = RefCell::new(LandmarkStore::default());
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Called from JavaScript with a flat Float32Array per pose result
///
/// 99 values (33 × x, y, z) or 132 values (33 × x, y, z, visibility).
/// An empty array means no person was detected this frame.
#[wasm_bindgen]
pub fn update_landmarks(data: &[f32]) {
    if data.is_empty() {
        clear_landmarks();
        return;
    }

    let stored = LANDMARKS.with(|store_cell| {
        let mut store = store_cell.borrow_mut();
        match KeypointFrame::from_flat(data, &store.gate) {
            Ok(frame) => {
                store.frame = Some(frame);
                store.frames_received += 1;
                true
            }
            Err(e) => {
                log::warn!("Ignoring landmark update: {}", e);
                false
            }
        }
    });

    if stored {
        super::coach::on_frame_arrival();
    }
}

/// Drop the stored frame (pose lost)
#[wasm_bindgen]
pub fn clear_landmarks() {
    LANDMARKS.with(|store_cell| store_cell.borrow_mut().frame = None);
}

/// Skeleton topology as flat [start0, end0, start1, end1, ...]
#[wasm_bindgen]
pub fn get_pose_connections() -> Vec<u32> {
    POSE_CONNECTIONS
        .iter()
        .flat_map(|&(start, end)| [start as u32, end as u32])
        .collect()
}

/// Total frames accepted since load (debug overlay)
#[wasm_bindgen]
pub fn get_frames_received() -> f64 {
    LANDMARKS.with(|store_cell| store_cell.borrow().frames_received as f64)
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Latest stored frame, if any
pub fn latest_frame() -> Option<KeypointFrame> {
    LANDMARKS.with(|store_cell| store_cell.borrow().frame.clone())
}

pub fn set_min_visibility(threshold: f32) {
    LANDMARKS.with(|store_cell| store_cell.borrow_mut().gate.set_threshold(threshold));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{LANDMARK_COUNT, RIGHT_KNEE};

    fn flat(value: f32) -> Vec<f32> {
        vec![value; LANDMARK_COUNT * 3]
    }

    #[test]
    fn test_keeps_latest_frame_only() {
        let before = get_frames_received();
        update_landmarks(&flat(0.1));
        update_landmarks(&flat(0.2));
        let frame = latest_frame().unwrap();
        assert_eq!(frame.get(RIGHT_KNEE).unwrap().x, 0.2);
        assert_eq!(get_frames_received() - before, 2.0);
    }

    #[test]
    fn test_bad_length_keeps_previous_frame() {
        update_landmarks(&flat(0.3));
        update_landmarks(&[0.5; 7]);
        assert_eq!(latest_frame().unwrap().get(RIGHT_KNEE).unwrap().x, 0.3);
    }

    #[test]
    fn test_empty_update_clears() {
        update_landmarks(&flat(0.4));
        update_landmarks(&[]);
        assert!(latest_frame().is_none());
    }

    #[test]
    fn test_pose_connections_flat() {
        let flat = get_pose_connections();
        assert_eq!(flat.len(), POSE_CONNECTIONS.len() * 2);
        assert_eq!(&flat[..2], &[11, 13]);
    }
}
