//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, timer or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Layout};
pub use input::{
    key_starts_session, move_to, move_to_pointer, pointer_to_percent, step_left, step_right,
};
pub use state::{FallingObject, GameEvent, GamePhase, GameState, Snapshot, TrashKind};
pub use tick::{apply_level_up, spawn, tick};
