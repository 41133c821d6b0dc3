//! Difficulty-weighted spawn policy
//!
//! Each spawn draws a uniform integer in [0,100) and partitions it into
//! consecutive ranges [cherry, banana, grape, bomb]. The per-kind weights
//! intentionally sum to more than 100 at low levels; every draw past the
//! three fruit ranges lands in the bomb branch, so the effective bomb
//! probability at level 0 is 10%, not the nominal 25. Tuned gameplay
//! behavior, kept on purpose.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, GameState, ObjectKind};
use crate::consts::OBJECT_SIZE;

/// Nominal draw weights for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnWeights {
    pub cherry: u32,
    pub banana: u32,
    pub grape: u32,
    pub bomb: u32,
}

/// Weight table: fruit gets rarer and bombs more common as the level climbs
pub fn weights_for(level: u32) -> SpawnWeights {
    SpawnWeights {
        cherry: 35u32.saturating_sub(level).max(15),
        banana: 30u32.saturating_sub(level).max(15),
        grape: 25u32.saturating_sub(level).max(10),
        bomb: (25.0 + 1.5 * level as f32).min(40.0) as u32,
    }
}

/// Map a uniform draw in [0,100) to an object kind
pub fn kind_for_roll(level: u32, roll: u32) -> ObjectKind {
    let w = weights_for(level);
    if roll < w.cherry {
        ObjectKind::Cherry
    } else if roll < w.cherry + w.banana {
        ObjectKind::Banana
    } else if roll < w.cherry + w.banana + w.grape {
        ObjectKind::Grape
    } else {
        // Remainder of the draw space, including any gap left by weights
        // that do not sum to 100
        ObjectKind::Bomb
    }
}

/// Produce exactly one new object just above the top edge. The base speed
/// is scaled by the current game speed at spawn time; the simulation step
/// scales by game speed again each tick. Both multiplies are intentional.
pub fn spawn_object<R: Rng>(
    state: &mut GameState,
    playfield_width: f32,
    rng: &mut R,
) -> FallingObject {
    let roll = rng.random_range(0..100u32);
    let kind = kind_for_roll(state.difficulty_level, roll);
    let base_speed = rng.random_range(kind.base_speed_range()) as f32;
    let x = rng.random_range(0..(playfield_width - OBJECT_SIZE) as u32) as f32;

    FallingObject {
        id: state.next_entity_id(),
        pos: Vec2::new(x, -OBJECT_SIZE),
        size: Vec2::splat(OBJECT_SIZE),
        speed: base_speed * state.game_speed,
        kind,
    }
}
