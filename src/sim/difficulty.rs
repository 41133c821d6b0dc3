//! Time-driven difficulty progression
//!
//! A monotonic level counter steps up every 5 seconds of wall-clock time.
//! Game speed and spawn interval are pure functions of the level, so they
//! are rederived rather than accumulated.

use super::state::GameState;
use crate::consts::*;

/// Speed multiplier for a difficulty level: 1 + 0.12 per level
pub fn game_speed_for(level: u32) -> f32 {
    1.0 + SPEED_STEP_PER_LEVEL * level as f32
}

/// Spawn interval for a difficulty level, integer-floored and clamped so
/// it never drops below MIN_SPAWN_INTERVAL_MS
pub fn spawn_interval_for(level: u32) -> u64 {
    ((BASE_SPAWN_INTERVAL_MS as f32 / game_speed_for(level)) as u64).max(MIN_SPAWN_INTERVAL_MS)
}

/// Advance the difficulty clock. Invoked every tick but only steps the
/// level once DIFFICULTY_INTERVAL_MS has elapsed since the last increase.
/// Returns true when the level changed.
pub fn advance(state: &mut GameState, now_ms: u64) -> bool {
    if now_ms.saturating_sub(state.last_difficulty_ms) <= DIFFICULTY_INTERVAL_MS {
        return false;
    }
    state.difficulty_level += 1;
    state.game_speed = game_speed_for(state.difficulty_level);
    state.spawn_interval_ms = spawn_interval_for(state.difficulty_level);
    state.last_difficulty_ms = now_ms;
    log::debug!(
        "difficulty up: level={} speed={:.2} spawn_interval={}ms",
        state.difficulty_level,
        state.game_speed,
        state.spawn_interval_ms
    );
    true
}
