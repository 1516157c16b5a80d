//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives in [`Tuning`]. The
//! defaults are the reference values; presets and settings files override
//! them without touching the engine.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Half-open speed range `[min, max)` in pixels per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn as_range(&self) -> Range<f32> {
        self.min..self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Aircraft extent
    pub aircraft_size: Vec2,
    /// Pixels moved per movement input
    pub aircraft_speed: f32,

    /// Bird extent
    pub obstacle_size: Vec2,
    /// Parachute extent
    pub fuel_pickup_size: Vec2,
    /// Star extent
    pub score_pickup_size: Vec2,

    /// Fuel at session start (one unit burns per decay interval)
    pub initial_fuel: u32,
    /// Fuel added per parachute caught
    pub fuel_bonus: u32,
    /// Score added per star caught
    pub score_bonus: u32,

    /// Per-tick spawn probabilities
    pub obstacle_spawn_chance: f64,
    pub fuel_spawn_chance: f64,
    pub score_spawn_chance: f64,

    pub obstacle_speed: SpeedRange,
    pub fuel_pickup_speed: SpeedRange,
    pub score_pickup_speed: SpeedRange,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            aircraft_size: Vec2::new(50.0, 50.0),
            aircraft_speed: 5.0,

            obstacle_size: Vec2::new(35.0, 35.0),
            fuel_pickup_size: Vec2::new(40.0, 40.0),
            score_pickup_size: Vec2::new(30.0, 30.0),

            initial_fuel: 10,
            fuel_bonus: 10,
            score_bonus: 1,

            obstacle_spawn_chance: 0.02,
            fuel_spawn_chance: 0.01,
            score_spawn_chance: 0.01,

            obstacle_speed: SpeedRange::new(2.0, 4.0),
            fuel_pickup_speed: SpeedRange::new(2.0, 4.0),
            score_pickup_speed: SpeedRange::new(1.0, 3.0),
        }
    }
}

impl Tuning {
    /// Check that every value is usable by the engine
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("aircraft_size", self.aircraft_size),
            ("obstacle_size", self.obstacle_size),
            ("fuel_pickup_size", self.fuel_pickup_size),
            ("score_pickup_size", self.score_pickup_size),
        ];
        for (name, size) in sizes {
            if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
                return Err(format!("{name} must be positive, got {size}"));
            }
        }

        if !(self.aircraft_speed.is_finite() && self.aircraft_speed > 0.0) {
            return Err(format!(
                "aircraft_speed must be positive, got {}",
                self.aircraft_speed
            ));
        }

        let chances = [
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("fuel_spawn_chance", self.fuel_spawn_chance),
            ("score_spawn_chance", self.score_spawn_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be within [0, 1], got {p}"));
            }
        }

        let speeds = [
            ("obstacle_speed", self.obstacle_speed),
            ("fuel_pickup_speed", self.fuel_pickup_speed),
            ("score_pickup_speed", self.score_pickup_speed),
        ];
        for (name, range) in speeds {
            if !range.is_valid() {
                return Err(format!(
                    "{name} must satisfy 0 < min < max, got [{}, {})",
                    range.min, range.max
                ));
            }
        }

        Ok(())
    }

    /// Largest width/height any falling or drifting entity can have
    pub fn largest_spawn_size(&self) -> Vec2 {
        self.obstacle_size
            .max(self.fuel_pickup_size)
            .max(self.score_pickup_size)
    }

    /// Scale bird spawn chance and bird speed by the given factors
    pub fn scaled(&self, spawn_factor: f64, speed_factor: f32) -> Self {
        let scale = |r: SpeedRange| SpeedRange::new(r.min * speed_factor, r.max * speed_factor);
        Self {
            obstacle_spawn_chance: (self.obstacle_spawn_chance * spawn_factor).clamp(0.0, 1.0),
            obstacle_speed: scale(self.obstacle_speed),
            ..self.clone()
        }
    }
}
