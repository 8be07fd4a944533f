//! Idle/demo mode: steer the catcher toward the most urgent object

use super::state::GameState;
use crate::clamp_catcher;
use crate::consts::{CATCHER_STEP, OBJECT_SIZE};

/// Target catcher position for the object closest to the floor
///
/// Objects are anchored at their top-left corner, so aim a little right of
/// `left` to put the bin under the object's centre. `area_width` is used to
/// convert the object half-width into percent.
pub fn target_x(state: &GameState, area_width: f32) -> Option<f32> {
    let lowest = state
        .objects
        .iter()
        .max_by(|a, b| {
            a.top
                .partial_cmp(&b.top)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let half_object_pct = if area_width > 0.0 {
        OBJECT_SIZE / 2.0 / area_width * 100.0
    } else {
        0.0
    };
    Some(clamp_catcher(lowest.left + half_object_pct))
}

/// Move at most one `CATCHER_STEP` toward the target
///
/// The store calls this once per mover tick, never per frame.
pub fn steer(state: &mut GameState, area_width: f32) {
    if !state.is_playing() {
        return;
    }
    if let Some(target) = target_x(state, area_width) {
        let delta = (target - state.catcher_x).clamp(-CATCHER_STEP, CATCHER_STEP);
        state.catcher_x = clamp_catcher(state.catcher_x + delta);
    }
}
