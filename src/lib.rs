//! Trash Catcher - A falling-trash arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `store`: Event-driven state store that notifies subscribed views
//! - `scheduler`: Interval timers driving the spawner and the mover
//! - `settings`: Layout and session configuration

pub mod error;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod store;

pub use error::{Error, Result};
pub use scheduler::Scheduler;
pub use settings::Settings;
pub use store::{GameStore, SubscriptionId};

/// Game configuration constants
pub mod consts {
    /// Mover/collider cadence in milliseconds
    pub const TICK_MS: u32 = 50;

    /// Spawn interval at level 0, reduced by `SPAWN_STEP_MS` per level
    pub const SPAWN_BASE_MS: u32 = 800;
    pub const SPAWN_STEP_MS: u32 = 50;
    /// Spawn interval floor (the unclamped formula reaches zero at level 16)
    pub const SPAWN_MIN_MS: u32 = 100;

    /// Points awarded per catch
    pub const CATCH_POINTS: u32 = 10;
    /// Score multiple per level that triggers a level up
    pub const LEVEL_THRESHOLD: u32 = 50;

    /// Fall speed at level 1 (percent of area height per tick)
    pub const START_SPEED: f32 = 2.0;
    /// Fall speed added on each level up
    pub const SPEED_STEP: f32 = 0.5;

    /// Catcher limits (percent of area width)
    pub const CATCHER_MIN: f32 = 5.0;
    pub const CATCHER_MAX: f32 = 95.0;
    pub const CATCHER_START: f32 = 50.0;
    /// Discrete step for button/keyboard control
    pub const CATCHER_STEP: f32 = 10.0;

    /// Horizontal spawn band (percent of area width)
    pub const SPAWN_LEFT_MIN: f32 = 10.0;
    pub const SPAWN_LEFT_MAX: f32 = 90.0;

    /// Vertical position at which an uncaught object breaches the floor
    pub const FLOOR: f32 = 100.0;

    /// Collision box edge length for a falling object (absolute units)
    pub const OBJECT_SIZE: f32 = 30.0;

    /// Largest elapsed time a single scheduler advance will simulate
    pub const MAX_ADVANCE_MS: f64 = 1000.0;
}

/// Clamp a catcher position into the playable band
#[inline]
pub fn clamp_catcher(percent: f32) -> f32 {
    percent.clamp(consts::CATCHER_MIN, consts::CATCHER_MAX)
}

/// Spawn interval for a level, floored at `SPAWN_MIN_MS`
#[inline]
pub fn spawn_interval_ms(level: u32) -> u32 {
    use consts::*;
    SPAWN_BASE_MS
        .saturating_sub(level.saturating_mul(SPAWN_STEP_MS))
        .max(SPAWN_MIN_MS)
}
