//! Game state and core simulation types
//!
//! Everything a view needs to draw a frame can be read through `Snapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended by a floor breach
    GameOver,
}

/// Visual variants of falling trash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrashKind {
    Plastic,
    Glass,
    Paper,
}

impl TrashKind {
    pub const ALL: [TrashKind; 3] = [TrashKind::Plastic, TrashKind::Glass, TrashKind::Paper];

    /// Map a roll in 0..3 to a kind
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 3) as usize]
    }

    /// CSS colour used by the browser shell
    pub fn color(&self) -> &'static str {
        match self {
            TrashKind::Plastic => "#FF5733",
            TrashKind::Glass => "#33FF57",
            TrashKind::Paper => "#3357FF",
        }
    }
}

/// A falling piece of trash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Horizontal position (percent of area width)
    pub left: f32,
    /// Vertical position (percent of area height, grows downward)
    pub top: f32,
    pub kind: TrashKind,
}

/// Things that happened during a transform, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { id: u32, kind: TrashKind },
    Caught { id: u32, kind: TrashKind },
    LevelUp { level: u32, speed: f32 },
    FloorBreach { id: u32 },
    GameOver { score: u32, level: u32 },
}

/// Read-only view of the state handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub level: u32,
    pub speed: f32,
    pub is_playing: bool,
    pub is_over: bool,
    pub catcher_x: f32,
    pub objects: Vec<FallingObject>,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u32,
    pub level: u32,
    /// Fall speed in percent of area height per tick
    pub speed: f32,
    pub phase: GamePhase,
    /// Catcher centre (percent of area width, clamped to [5, 95])
    pub catcher_x: f32,
    /// Falling objects in spawn order
    pub objects: Vec<FallingObject>,
    /// Mover ticks since the session started
    pub time_ticks: u64,
    /// Number of sessions started on this state
    pub sessions: u32,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            level: 1,
            speed: START_SPEED,
            phase: GamePhase::Idle,
            catcher_x: CATCHER_START,
            objects: Vec::new(),
            time_ticks: 0,
            sessions: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin a fresh session, discarding whatever was in progress
    pub fn start(&mut self) -> GameEvent {
        self.score = 0;
        self.level = 1;
        self.speed = START_SPEED;
        self.phase = GamePhase::Playing;
        self.catcher_x = CATCHER_START;
        self.objects.clear();
        self.time_ticks = 0;
        self.sessions += 1;
        GameEvent::Started
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// RNG used by the spawner
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Current spawn cadence for this level
    pub fn spawn_interval_ms(&self) -> u32 {
        crate::spawn_interval_ms(self.level)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            level: self.level,
            speed: self.speed,
            is_playing: self.is_playing(),
            is_over: self.is_over(),
            catcher_x: self.catcher_x,
            objects: self.objects.clone(),
        }
    }
}
