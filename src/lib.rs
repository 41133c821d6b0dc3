//! Fruitfall - a falling-fruit catch-or-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `platform`: Asset / audio / surface / dialog collaborator traits
//! - `render`: Per-tick frame snapshot assembly
//! - `game_loop`: Fixed-cadence worker thread driving the simulation
//! - `audio`: Event-to-sound-cue mapping
//! - `settings`: Audio/HUD preferences persisted as JSON

pub mod audio;
pub mod game_loop;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed delay between ticks (~60 Hz), not frame-rate compensated
    pub const TICK_MS: u64 = 16;
    /// Backoff while the render surface is not yet ready
    pub const SURFACE_POLL_MS: u64 = 5;
    /// Longest `GameLoop::stop` waits for the worker before detaching it
    pub const STOP_TIMEOUT_MS: u64 = 250;

    /// Play-field dimensions (origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 1080.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1920.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 200.0;
    pub const PLAYER_HEIGHT: f32 = 250.0;
    /// Gap between the player's feet and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 50.0;

    /// Falling objects are square sprites
    pub const OBJECT_SIZE: f32 = 120.0;

    pub const START_LIVES: u8 = 3;

    /// Difficulty steps up every 5 seconds
    pub const DIFFICULTY_INTERVAL_MS: u64 = 5000;
    /// Speed multiplier gained per difficulty level
    pub const SPEED_STEP_PER_LEVEL: f32 = 0.12;

    /// Spawn interval at difficulty 0
    pub const BASE_SPAWN_INTERVAL_MS: u64 = 1000;
    /// Spawn interval never drops below this floor
    pub const MIN_SPAWN_INTERVAL_MS: u64 = 500;
}
