//! Interval timers for the spawner and the mover
//!
//! Timers exist only while a session is playing. They are keyed on the
//! session and level they were registered for: a restart or level change
//! re-registers them from the current time, and leaving the playing phase
//! cancels both.

use crate::consts::{MAX_ADVANCE_MS, TICK_MS};
use crate::sim::{GameEvent, GameState, Layout};
use crate::store::GameStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Mover,
    Spawner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interval {
    period_ms: f64,
    next_due_ms: f64,
}

impl Interval {
    fn starting_at(now_ms: f64, period_ms: u32) -> Self {
        let period_ms = f64::from(period_ms);
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }
}

/// What the timers were registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration {
    session: u32,
    level: u32,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: f64,
    mover: Option<Interval>,
    spawner: Option<Interval>,
    registration: Option<Registration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Whether any timer is registered
    pub fn is_armed(&self) -> bool {
        self.mover.is_some() || self.spawner.is_some()
    }

    /// Registered spawn period, if armed
    pub fn spawn_period_ms(&self) -> Option<f64> {
        self.spawner.map(|s| s.period_ms)
    }

    /// Register, re-register or cancel timers to match the state
    pub fn sync(&mut self, state: &GameState) {
        if !state.is_playing() {
            if self.is_armed() {
                log::debug!("Timers cancelled at {}ms", self.now_ms);
            }
            self.mover = None;
            self.spawner = None;
            self.registration = None;
            return;
        }

        let wanted = Registration {
            session: state.sessions,
            level: state.level,
        };
        if self.registration == Some(wanted) {
            return;
        }

        self.mover = Some(Interval::starting_at(self.now_ms, TICK_MS));
        self.spawner = Some(Interval::starting_at(self.now_ms, state.spawn_interval_ms()));
        self.registration = Some(wanted);
        log::debug!(
            "Timers registered at {}ms: spawn every {}ms (level {})",
            self.now_ms,
            state.spawn_interval_ms(),
            state.level
        );
    }

    /// Earliest timer due at or before `until`; the mover wins ties
    fn next_due(&self, until: f64) -> Option<(Timer, f64)> {
        let mover = self.mover.map(|m| (Timer::Mover, m.next_due_ms));
        let spawner = self.spawner.map(|s| (Timer::Spawner, s.next_due_ms));
        let next = match (mover, spawner) {
            (Some(m), Some(s)) => Some(if s.1 < m.1 { s } else { m }),
            (m, s) => m.or(s),
        };
        next.filter(|(_, due)| *due <= until)
    }

    /// Advance simulated time, firing due timers in chronological order
    ///
    /// `dt_ms` is capped at `MAX_ADVANCE_MS`. Timers are re-synced with the
    /// store after every firing, so nothing fires after a game over.
    pub fn advance(
        &mut self,
        store: &mut GameStore,
        dt_ms: f64,
        layout: Option<&Layout>,
    ) -> Vec<GameEvent> {
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_ADVANCE_MS)
        } else {
            0.0
        };
        let until = self.now_ms + dt_ms;
        let mut events = Vec::new();

        self.sync(store.state());
        while let Some((timer, due)) = self.next_due(until) {
            self.now_ms = due;
            match timer {
                Timer::Mover => {
                    if let Some(m) = self.mover.as_mut() {
                        m.next_due_ms += m.period_ms;
                    }
                    events.extend(store.tick(layout));
                }
                Timer::Spawner => {
                    if let Some(s) = self.spawner.as_mut() {
                        s.next_due_ms += s.period_ms;
                    }
                    events.extend(store.spawn());
                }
            }
            self.sync(store.state());
        }
        self.now_ms = until;

        events
    }
}
