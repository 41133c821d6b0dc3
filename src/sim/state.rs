//! Game state and core simulation types
//!
//! A single explicit `GameState` value owns everything the simulation
//! mutates; the tick functions take it by `&mut` so every component is
//! unit-testable in isolation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty;
use crate::consts::*;

/// Closed set of falling object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Cherry,
    Banana,
    Grape,
    Bomb,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Cherry,
        ObjectKind::Banana,
        ObjectKind::Grape,
        ObjectKind::Bomb,
    ];

    /// Signed score delta for catching this object
    pub fn reward(self) -> i32 {
        match self {
            ObjectKind::Cherry => 5,
            ObjectKind::Banana => 10,
            ObjectKind::Grape => 15,
            ObjectKind::Bomb => -30,
        }
    }

    /// Whether catching this object costs a life
    pub fn is_hazard(self) -> bool {
        self.reward() < 0
    }

    /// Base fall speed sampling range in play-field units per tick.
    /// Bombs fall noticeably faster than fruit.
    pub fn base_speed_range(self) -> std::ops::Range<u32> {
        match self {
            ObjectKind::Bomb => 15..22,
            _ => 8..15,
        }
    }
}

/// A live falling object. Created by the spawn policy, removed by the
/// simulation step on catch or once it leaves the bottom of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed, already scaled by the game speed at spawn time
    pub speed: f32,
    pub kind: ObjectKind,
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// The player's catch hitbox. Fixed size, pinned near the bottom edge;
/// only the horizontal coordinate ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Left edge, clamped to [0, PLAYFIELD_WIDTH - PLAYER_WIDTH]
    pub x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: (PLAYFIELD_WIDTH - PLAYER_WIDTH) / 2.0,
        }
    }
}

impl Player {
    /// Move the hitbox so its center sits at `center_x`, clamped so the
    /// hitbox stays fully inside the play-field. Out-of-bounds drag
    /// coordinates are valid input, never an error.
    pub fn set_center_x(&mut self, center_x: f32) {
        self.x = (center_x - PLAYER_WIDTH / 2.0).clamp(0.0, PLAYFIELD_WIDTH - PLAYER_WIDTH);
    }

    pub fn rect(&self) -> Rect {
        let top = PLAYFIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN;
        Rect::from_pos_size(
            Vec2::new(self.x, top),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        )
    }
}

/// Outcome of one simulation tick, consumed by the audio/dialog glue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FruitCaught { kind: ObjectKind, reward: i32 },
    BombHit { lives_left: u8 },
    /// Emitted exactly once per run, when lives reach zero
    GameOver { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Never negative; signed rewards saturate at zero
    pub score: u32,
    /// Stays within [0, START_LIVES]
    pub lives: u8,
    /// Monotonic, advances every DIFFICULTY_INTERVAL_MS
    pub difficulty_level: u32,
    /// Derived from difficulty_level, always >= 1
    pub game_speed: f32,
    /// Derived from difficulty_level, floored at MIN_SPAWN_INTERVAL_MS
    pub spawn_interval_ms: u64,
    /// One-way transition, cleared only by reset
    pub game_over: bool,
    pub last_spawn_ms: u64,
    pub last_difficulty_ms: u64,
    /// Time base for the player's looping animation
    pub anim_start_ms: u64,
    pub player: Player,
    pub objects: Vec<FallingObject>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, now_ms: u64) -> Self {
        Self {
            seed,
            score: 0,
            lives: START_LIVES,
            difficulty_level: 0,
            game_speed: difficulty::game_speed_for(0),
            spawn_interval_ms: difficulty::spawn_interval_for(0),
            game_over: false,
            last_spawn_ms: now_ms,
            last_difficulty_ms: now_ms,
            anim_start_ms: now_ms,
            player: Player::default(),
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Return every field to its initial value and clear the live set.
    /// Calling reset twice is the same as calling it once.
    pub fn reset(&mut self, now_ms: u64) {
        *self = Self::new(self.seed, now_ms);
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
