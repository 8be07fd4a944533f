//! Input adapter: pointer/touch coordinates and step buttons to catcher position

use super::state::GameState;
use crate::clamp_catcher;
use crate::consts::CATCHER_STEP;

/// Convert an absolute horizontal coordinate to a percent of the play area
///
/// Returns `None` when the area width is unusable (missing layout info).
pub fn pointer_to_percent(client_x: f32, area_left: f32, area_width: f32) -> Option<f32> {
    if !area_width.is_finite() || area_width <= 0.0 || !client_x.is_finite() {
        return None;
    }
    Some((client_x - area_left) / area_width * 100.0)
}

/// Move the catcher under the pointer; ignored unless playing
///
/// Returns true when the position was written.
pub fn move_to_pointer(
    state: &mut GameState,
    client_x: f32,
    area_left: f32,
    area_width: f32,
) -> bool {
    if !state.is_playing() {
        return false;
    }
    match pointer_to_percent(client_x, area_left, area_width) {
        Some(percent) => {
            state.catcher_x = clamp_catcher(percent);
            true
        }
        None => {
            log::warn!("Pointer move ignored: play area width {}", area_width);
            false
        }
    }
}

/// Set the catcher to a percent position directly (clamped)
pub fn move_to(state: &mut GameState, percent: f32) -> bool {
    if !state.is_playing() || !percent.is_finite() {
        return false;
    }
    state.catcher_x = clamp_catcher(percent);
    true
}

pub fn step_left(state: &mut GameState) -> bool {
    move_to(state, state.catcher_x - CATCHER_STEP)
}

pub fn step_right(state: &mut GameState) -> bool {
    move_to(state, state.catcher_x + CATCHER_STEP)
}

/// Whether a key press should start a session
///
/// Keys pressed while the start button has focus are left to the button's
/// own click, otherwise one press would start twice.
pub fn key_starts_session(key: &str, on_start_button: bool, playing: bool) -> bool {
    matches!(key, " " | "Enter") && !on_start_button && !playing
}
