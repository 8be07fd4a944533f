//! Event-driven state store
//!
//! Every mutation goes through a `GameStore` method. After the transform
//! runs, subscribed views are called with the new state and the events the
//! transform produced, in subscription order.

use crate::sim::{self, GameEvent, GameState, Layout};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Subscriber = Box<dyn FnMut(&GameState, &[GameEvent])>;

pub struct GameStore {
    state: GameState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u32,
    autopilot: bool,
}

impl GameStore {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription: 1,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn subscribe<F>(&mut self, view: F) -> SubscriptionId
    where
        F: FnMut(&GameState, &[GameEvent]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(view)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Run a transform, then notify views
    ///
    /// Views are notified even when the transform produced no events, so a
    /// moved catcher still re-renders.
    pub fn update<F>(&mut self, transform: F) -> Vec<GameEvent>
    where
        F: FnOnce(&mut GameState) -> Vec<GameEvent>,
    {
        let events = transform(&mut self.state);
        for (_, view) in self.subscribers.iter_mut() {
            view(&self.state, &events);
        }
        events
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        let events = self.update(|state| vec![state.start()]);
        log::info!("Session started (seed {})", self.state.seed);
        events
    }

    pub fn spawn(&mut self) -> Vec<GameEvent> {
        self.update(|state| sim::spawn(state).into_iter().collect())
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if self.autopilot != on {
            log::info!("Autopilot: {}", on);
        }
        self.autopilot = on;
    }

    /// One mover tick; with the autopilot on, the catcher first takes one
    /// step toward the lowest object
    pub fn tick(&mut self, layout: Option<&Layout>) -> Vec<GameEvent> {
        let autopilot = self.autopilot;
        self.update(|state| {
            if let Some(layout) = layout.filter(|_| autopilot) {
                sim::autopilot::steer(state, layout.area.x);
            }
            sim::tick(state, layout)
        })
    }

    pub fn pointer_move(&mut self, client_x: f32, area_left: f32, area_width: f32) {
        self.update(|state| {
            sim::move_to_pointer(state, client_x, area_left, area_width);
            Vec::new()
        });
    }

    pub fn step_left(&mut self) {
        self.update(|state| {
            sim::step_left(state);
            Vec::new()
        });
    }

    pub fn step_right(&mut self) {
        self.update(|state| {
            sim::step_right(state);
            Vec::new()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_see_every_transform() {
        let mut store = GameStore::new(5);
        let seen: Rc<RefCell<Vec<Vec<GameEvent>>>> = Rc::default();
        let log = seen.clone();
        store.subscribe(move |_, events| log.borrow_mut().push(events.to_vec()));

        store.start();
        store.spawn();
        store.step_left();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], vec![GameEvent::Started]);
        assert!(matches!(seen[1][0], GameEvent::Spawned { .. }));
        assert!(seen[2].is_empty());
    }

    #[test]
    fn test_subscriber_reads_updated_state() {
        let mut store = GameStore::new(5);
        let last_x = Rc::new(RefCell::new(0.0));
        let sink = last_x.clone();
        store.subscribe(move |state, _| *sink.borrow_mut() = state.catcher_x);

        store.start();
        store.step_right();
        assert_eq!(*last_x.borrow(), 60.0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = GameStore::new(5);
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let id = store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        store.start();
        assert!(store.unsubscribe(id));
        store.spawn();
        assert_eq!(*count.borrow(), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut store = GameStore::new(5);
        store.step_left();
        store.pointer_move(0.0, 0.0, 400.0);
        assert_eq!(store.state().catcher_x, 50.0);
        assert!(store.spawn().is_empty());
    }

    #[test]
    fn test_autopilot_steps_once_per_tick() {
        let layout = Layout::new(glam::Vec2::new(400.0, 400.0), glam::Vec2::new(80.0, 64.0));
        let mut store = GameStore::new(5);
        store.set_autopilot(true);
        store.start();
        store.update(|state| {
            let id = state.next_object_id();
            state.objects.push(sim::FallingObject {
                id,
                left: 85.0,
                top: 0.0,
                kind: sim::TrashKind::Plastic,
            });
            Vec::new()
        });
        assert_eq!(store.state().catcher_x, 50.0);

        store.tick(Some(&layout));
        assert_eq!(store.state().catcher_x, 60.0);
        store.tick(Some(&layout));
        assert_eq!(store.state().catcher_x, 70.0);

        // No layout, no steering
        store.tick(None);
        assert_eq!(store.state().catcher_x, 70.0);
    }

    #[test]
    fn test_autopilot_off_leaves_catcher() {
        let layout = Layout::new(glam::Vec2::new(400.0, 400.0), glam::Vec2::new(80.0, 64.0));
        let mut store = GameStore::new(5);
        store.start();
        store.spawn();
        store.tick(Some(&layout));
        assert!(!store.autopilot());
        assert_eq!(store.state().catcher_x, 50.0);
    }
}
