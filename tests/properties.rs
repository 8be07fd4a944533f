//! Property tests for simulation invariants

use std::collections::HashMap;

use glam::Vec2;
use proptest::prelude::*;
use trash_catcher::sim::{self, GameState, Layout};
use trash_catcher::spawn_interval_ms;

#[derive(Debug, Clone)]
enum Action {
    Spawn,
    Tick,
    Pointer(f32),
    StepLeft,
    StepRight,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => Just(Action::Spawn),
        6 => Just(Action::Tick),
        1 => (-500.0f32..1500.0).prop_map(Action::Pointer),
        1 => Just(Action::StepLeft),
        1 => Just(Action::StepRight),
    ]
}

fn layout() -> Layout {
    Layout::new(Vec2::new(400.0, 400.0), Vec2::new(80.0, 64.0))
}

fn apply(state: &mut GameState, action: &Action) {
    match action {
        Action::Spawn => {
            sim::spawn(state);
        }
        Action::Tick => {
            sim::tick(state, Some(&layout()));
        }
        Action::Pointer(x) => {
            sim::move_to_pointer(state, *x, 100.0, 400.0);
        }
        Action::StepLeft => {
            sim::step_left(state);
        }
        Action::StepRight => {
            sim::step_right(state);
        }
    }
}

proptest! {
    #[test]
    fn catcher_stays_in_band(
        seed in any::<u64>(),
        actions in proptest::collection::vec(action(), 0..300),
    ) {
        let mut state = GameState::new(seed);
        state.start();
        for action in &actions {
            apply(&mut state, action);
            prop_assert!((5.0..=95.0).contains(&state.catcher_x));
        }
    }

    #[test]
    fn objects_never_move_up(
        seed in any::<u64>(),
        actions in proptest::collection::vec(action(), 0..300),
    ) {
        let mut state = GameState::new(seed);
        state.start();
        let mut last_top: HashMap<u32, f32> = HashMap::new();
        for action in &actions {
            apply(&mut state, action);
            for obj in &state.objects {
                if let Some(prev) = last_top.get(&obj.id) {
                    prop_assert!(obj.top >= *prev);
                }
                last_top.insert(obj.id, obj.top);
            }
        }
    }

    #[test]
    fn score_is_multiple_of_ten_and_session_consistent(
        seed in any::<u64>(),
        actions in proptest::collection::vec(action(), 0..400),
    ) {
        let mut state = GameState::new(seed);
        state.start();
        for action in &actions {
            apply(&mut state, action);
            prop_assert_eq!(state.score % 10, 0);
            prop_assert!(state.level >= 1);
            if state.is_over() {
                prop_assert!(state.objects.is_empty());
                prop_assert!(!state.is_playing());
            }
        }
    }

    #[test]
    fn spawn_interval_is_bounded(level in 1u32..10_000) {
        let interval = spawn_interval_ms(level);
        prop_assert!(interval >= 100);
        prop_assert!(interval <= 750);
    }

    #[test]
    fn start_is_idempotent(seed in any::<u64>(), restarts in 1usize..5) {
        let mut state = GameState::new(seed);
        for _ in 0..restarts {
            state.start();
            sim::spawn(&mut state);
            sim::step_left(&mut state);
        }
        state.start();
        let snap = state.snapshot();
        prop_assert_eq!(snap.score, 0);
        prop_assert_eq!(snap.level, 1);
        prop_assert_eq!(snap.speed, 2.0);
        prop_assert!(snap.is_playing);
        prop_assert!(!snap.is_over);
        prop_assert!(snap.objects.is_empty());
    }
}
