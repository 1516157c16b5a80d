//! Flight simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Randomness comes in through the caller's RNG
//! - Time comes in as explicit `tick` / `decay_fuel_and_time` calls
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Bounds, rects_overlap};
pub use state::{
    AssetHandle, Assets, EndCause, Entity, GameEvent, RunSummary, Signal, SpriteKind, SpriteSet,
    World, WorldError,
};
pub use tick::{
    Direction, advance, decay_fuel_and_time, move_aircraft, spawn_fuel_pickup, spawn_obstacle,
    spawn_score_pickup, tick,
};
