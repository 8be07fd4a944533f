//! Spawner, mover/collider and leveler
//!
//! Each function is one read-modify-write transform over `GameState` and
//! returns the events it produced, in order.

use rand::Rng;

use super::collision::Layout;
use super::state::{FallingObject, GameEvent, GamePhase, GameState, TrashKind};
use crate::consts::*;

/// Drop one new object at the top of the play area
pub fn spawn(state: &mut GameState) -> Option<GameEvent> {
    if !state.is_playing() {
        return None;
    }

    let left = state.rng().random_range(SPAWN_LEFT_MIN..=SPAWN_LEFT_MAX);
    let kind = TrashKind::from_index(state.rng().random_range(0..3));
    let id = state.next_object_id();
    state.objects.push(FallingObject {
        id,
        left,
        top: 0.0,
        kind,
    });
    log::debug!("Spawned {:?} #{} at {:.1}%", kind, id, left);

    Some(GameEvent::Spawned { id, kind })
}

/// Advance every object by the current speed and resolve catches and breaches
///
/// Without a layout the catch test is skipped for this tick; breaches are
/// still detected.
pub fn tick(state: &mut GameState, layout: Option<&Layout>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    state.time_ticks += 1;

    let objects = std::mem::take(&mut state.objects);
    let mut kept = Vec::with_capacity(objects.len());
    let mut breached = false;
    // A level up mid-pass only affects later ticks
    let speed = state.speed;

    for mut obj in objects {
        let new_top = obj.top + speed;

        // Catch wins over breach when both happen on the same tick
        let caught = layout.is_some_and(|l| l.is_catch(obj.left, new_top, state.catcher_x));
        if caught {
            state.score += CATCH_POINTS;
            events.push(GameEvent::Caught {
                id: obj.id,
                kind: obj.kind,
            });
            if let Some(level_up) = apply_level_up(state) {
                events.push(level_up);
            }
            continue;
        }

        if new_top >= FLOOR {
            breached = true;
            events.push(GameEvent::FloorBreach { id: obj.id });
            continue;
        }

        obj.top = new_top;
        kept.push(obj);
    }

    if breached {
        // Nothing may outlive the session
        state.phase = GamePhase::GameOver;
        state.objects.clear();
        log::info!(
            "Game over: score {} at level {}",
            state.score,
            state.level
        );
        events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    } else {
        state.objects = kept;
    }

    events
}

/// Level up when the score lands on a positive multiple of `level * 50`
///
/// Call once after every score change.
pub fn apply_level_up(state: &mut GameState) -> Option<GameEvent> {
    let threshold = state.level.saturating_mul(LEVEL_THRESHOLD);
    if state.score == 0 || threshold == 0 || state.score % threshold != 0 {
        return None;
    }

    state.level += 1;
    state.speed += SPEED_STEP;
    log::debug!("Level {} (speed {})", state.level, state.speed);

    Some(GameEvent::LevelUp {
        level: state.level,
        speed: state.speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn layout() -> Layout {
        Layout::new(Vec2::new(400.0, 400.0), Vec2::new(80.0, 64.0))
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    fn push_object(state: &mut GameState, left: f32, top: f32) -> u32 {
        let id = state.next_object_id();
        state.objects.push(FallingObject {
            id,
            left,
            top,
            kind: TrashKind::Plastic,
        });
        id
    }

    #[test]
    fn test_spawn_places_object_in_band() {
        let mut state = playing(12345);
        for _ in 0..50 {
            assert!(matches!(spawn(&mut state), Some(GameEvent::Spawned { .. })));
        }
        assert_eq!(state.objects.len(), 50);
        for obj in &state.objects {
            assert!((10.0..=90.0).contains(&obj.left));
            assert_eq!(obj.top, 0.0);
        }
    }

    #[test]
    fn test_spawn_ignored_when_not_playing() {
        let mut state = GameState::new(1);
        assert!(spawn(&mut state).is_none());
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_tick_moves_by_speed() {
        let mut state = playing(1);
        push_object(&mut state, 10.0, 0.0);
        tick(&mut state, Some(&layout()));
        assert_eq!(state.objects[0].top, 2.0);
        state.speed = 3.5;
        tick(&mut state, Some(&layout()));
        assert_eq!(state.objects[0].top, 5.5);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_catch_scores_and_removes() {
        let mut state = playing(1);
        let id = push_object(&mut state, 45.0, 78.0);
        let events = tick(&mut state, Some(&layout()));
        assert_eq!(
            events,
            vec![GameEvent::Caught {
                id,
                kind: TrashKind::Plastic
            }]
        );
        assert_eq!(state.score, 10);
        assert!(state.objects.is_empty());
        assert!(state.is_playing());
    }

    #[test]
    fn test_floor_breach_ends_game() {
        let mut state = playing(1);
        let id = push_object(&mut state, 85.0, 98.0);
        push_object(&mut state, 30.0, 10.0);
        state.catcher_x = 5.0;

        let events = tick(&mut state, Some(&layout()));
        assert_eq!(events[0], GameEvent::FloorBreach { id });
        assert_eq!(
            events[1],
            GameEvent::GameOver {
                score: 0,
                level: 1
            }
        );
        assert!(state.is_over());
        assert!(!state.is_playing());
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_catch_beats_breach_on_same_tick() {
        let mut state = playing(1);
        // Bin overhangs the floor so a box at >= 100% can still touch it
        let mut overhang = layout();
        overhang.catcher_bottom = 440.0;
        let id = push_object(&mut state, 45.0, 99.0);

        let events = tick(&mut state, Some(&overhang));
        assert_eq!(
            events,
            vec![GameEvent::Caught {
                id,
                kind: TrashKind::Plastic
            }]
        );
        assert_eq!(state.score, 10);
        assert!(state.is_playing());
    }

    #[test]
    fn test_missing_layout_skips_catch() {
        let mut state = playing(1);
        push_object(&mut state, 45.0, 78.0);
        let events = tick(&mut state, None);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.objects[0].top, 80.0);
    }

    #[test]
    fn test_tick_ignored_when_over() {
        let mut state = playing(1);
        state.phase = GamePhase::GameOver;
        push_object(&mut state, 45.0, 10.0);
        assert!(tick(&mut state, Some(&layout())).is_empty());
        assert_eq!(state.objects[0].top, 10.0);
    }

    #[test]
    fn test_level_up_at_threshold() {
        let mut state = playing(1);
        state.score = 40;
        push_object(&mut state, 45.0, 78.0);
        let events = tick(&mut state, Some(&layout()));
        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, 2.5);
        assert_eq!(
            events.last(),
            Some(&GameEvent::LevelUp {
                level: 2,
                speed: 2.5
            })
        );
    }

    #[test]
    fn test_level_up_on_second_catch_in_same_tick() {
        let mut state = playing(1);
        state.score = 40;
        push_object(&mut state, 45.0, 78.0);
        push_object(&mut state, 40.0, 78.0);
        let bystander = push_object(&mut state, 10.0, 0.0);

        let events = tick(&mut state, Some(&layout()));
        assert_eq!(state.score, 60);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, 2.5);
        let level_ups = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);

        // Still moved at the speed the tick started with
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].id, bystander);
        assert_eq!(state.objects[0].top, 2.0);
    }

    #[test]
    fn test_level_up_only_on_exact_multiple() {
        let mut state = playing(1);
        state.level = 2;
        state.score = 50;
        assert!(apply_level_up(&mut state).is_none());
        state.score = 100;
        assert!(apply_level_up(&mut state).is_some());
        assert_eq!(state.level, 3);
        // Same score does not cascade into another level
        assert!(apply_level_up(&mut state).is_none());
    }

    #[test]
    fn test_level_up_skipped_at_zero() {
        let mut state = playing(1);
        assert!(apply_level_up(&mut state).is_none());
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99999);
        let mut b = playing(99999);
        for _ in 0..20 {
            spawn(&mut a);
            spawn(&mut b);
            tick(&mut a, Some(&layout()));
            tick(&mut b, Some(&layout()));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
