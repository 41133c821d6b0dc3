//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::{SpawnWeights, kind_for_roll, spawn_object, weights_for};
pub use state::{FallingObject, GameEvent, GameState, ObjectKind, Player};
pub use tick::{TickInput, advance_objects, tick};
