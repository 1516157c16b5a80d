//! World model and entity types
//!
//! Pure data plus construction. The engine in `tick.rs` is the only code
//! that moves things around once a [`World`] exists.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::Bounds;
use crate::tuning::Tuning;

/// Sprite slots a host can provide art for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Aircraft,
    Bird,
    Parachute,
    Star,
    /// Decorative only, never required
    Cloud,
}

impl SpriteKind {
    /// Sprites the simulation needs before a world can be built
    pub const REQUIRED: [SpriteKind; 4] = [
        SpriteKind::Aircraft,
        SpriteKind::Bird,
        SpriteKind::Parachute,
        SpriteKind::Star,
    ];
}

/// Opaque reference to host-owned art. Never interpreted by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle(pub u32);

/// Sprite handles supplied by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assets {
    handles: HashMap<SpriteKind, AssetHandle>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, kind: SpriteKind, handle: AssetHandle) -> Self {
        self.handles.insert(kind, handle);
        self
    }

    pub fn insert(&mut self, kind: SpriteKind, handle: AssetHandle) {
        self.handles.insert(kind, handle);
    }

    pub fn get(&self, kind: SpriteKind) -> Option<AssetHandle> {
        self.handles.get(&kind).copied()
    }

    /// One handle per sprite kind, numbered in declaration order
    pub fn placeholder() -> Self {
        let kinds = [
            SpriteKind::Aircraft,
            SpriteKind::Bird,
            SpriteKind::Parachute,
            SpriteKind::Star,
            SpriteKind::Cloud,
        ];
        kinds
            .into_iter()
            .enumerate()
            .fold(Self::new(), |assets, (i, kind)| {
                assets.with(kind, AssetHandle(i as u32))
            })
    }
}

/// Handles resolved at world creation, so spawning never fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub aircraft: AssetHandle,
    pub bird: AssetHandle,
    pub parachute: AssetHandle,
    pub star: AssetHandle,
    pub cloud: Option<AssetHandle>,
}

impl SpriteSet {
    fn resolve(assets: &Assets) -> Result<Self, WorldError> {
        let require = |kind| assets.get(kind).ok_or(WorldError::MissingAsset(kind));
        Ok(Self {
            aircraft: require(SpriteKind::Aircraft)?,
            bird: require(SpriteKind::Bird)?,
            parachute: require(SpriteKind::Parachute)?,
            star: require(SpriteKind::Star)?,
            cloud: assets.get(SpriteKind::Cloud),
        })
    }
}

/// Errors from building a world
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("play field must be non-empty, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("play field {width}x{height} is too small for the configured entity sizes")]
    FieldTooSmall { width: u32, height: u32 },

    #[error("missing sprite handle for {0:?}")]
    MissingAsset(SpriteKind),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Anything with a box and a drift speed: the aircraft, birds, parachutes, stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Birds drift -x, pickups drift +y; the aircraft uses this per input step
    pub speed: f32,
    pub sprite: AssetHandle,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, speed: f32, sprite: AssetHandle) -> Self {
        Self {
            pos,
            size,
            speed,
            sprite,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Flew into a bird
    Collision,
    /// Tank ran dry
    FuelExhausted,
}

/// Final result handed to the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seconds survived
    pub elapsed_time: u32,
    /// Stars collected
    pub score: u32,
    pub cause: EndCause,
}

/// Termination signal returned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Continue,
    GameOver(RunSummary),
}

impl Signal {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Signal::GameOver(_))
    }
}

/// Things that happened during the last engine call (for sound/UI feedback)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { pos: Vec2 },
    FuelSpawned { pos: Vec2 },
    StarSpawned { pos: Vec2 },
    FuelCollected { fuel: u32 },
    StarCollected { score: u32 },
    Crashed,
    FuelExhausted,
}

/// The live simulation for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Play-field bounds in logical pixels
    pub width: u32,
    pub height: u32,
    pub aircraft: Entity,
    /// Birds
    pub obstacles: Vec<Entity>,
    /// Parachutes
    pub pickups_fuel: Vec<Entity>,
    /// Stars
    pub pickups_score: Vec<Entity>,
    pub fuel: u32,
    /// Seconds elapsed, advanced by the decay timer only
    pub elapsed_time: u32,
    pub score: u32,
    /// One-way: set on crash or empty tank
    pub terminated: bool,
    /// Set together with `terminated`
    pub end_cause: Option<EndCause>,
    /// Events from the most recent engine call
    #[serde(default)]
    pub events: Vec<GameEvent>,
    pub sprites: SpriteSet,
    pub tuning: Tuning,
}

impl World {
    /// Create a world with the reference tuning
    pub fn new(width: u32, height: u32, assets: &Assets) -> Result<Self, WorldError> {
        Self::with_tuning(width, height, assets, Tuning::default())
    }

    /// Create a world with the aircraft centered and everything else empty
    pub fn with_tuning(
        width: u32,
        height: u32,
        assets: &Assets,
        tuning: Tuning,
    ) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        tuning.validate().map_err(WorldError::InvalidTuning)?;

        let field = Vec2::new(width as f32, height as f32);
        let needed = tuning.aircraft_size.max(tuning.largest_spawn_size());
        if needed.x > field.x || needed.y > field.y {
            return Err(WorldError::FieldTooSmall { width, height });
        }

        let sprites = SpriteSet::resolve(assets)?;

        let aircraft = Entity::new(
            (field - tuning.aircraft_size) * 0.5,
            tuning.aircraft_size,
            tuning.aircraft_speed,
            sprites.aircraft,
        );

        log::debug!("World created: {}x{}, fuel {}", width, height, tuning.initial_fuel);

        Ok(Self {
            width,
            height,
            aircraft,
            obstacles: Vec::new(),
            pickups_fuel: Vec::new(),
            pickups_score: Vec::new(),
            fuel: tuning.initial_fuel,
            elapsed_time: 0,
            score: 0,
            terminated: false,
            end_cause: None,
            events: Vec::new(),
            sprites,
            tuning,
        })
    }

    /// Field extent as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Time and score so far, with the end cause if the run is over
    pub fn summary(&self) -> Option<RunSummary> {
        self.end_cause.map(|cause| RunSummary {
            elapsed_time: self.elapsed_time,
            score: self.score,
            cause,
        })
    }

    /// Signal matching the current state
    pub fn signal(&self) -> Signal {
        match self.summary() {
            Some(summary) if self.terminated => Signal::GameOver(summary),
            _ => Signal::Continue,
        }
    }

    /// Mark the run as over (no-op if it already is)
    pub(crate) fn terminate(&mut self, cause: EndCause) -> Signal {
        if !self.terminated {
            self.terminated = true;
            self.end_cause = Some(cause);
            log::info!(
                "Run over ({:?}): time {}s, stars {}",
                cause,
                self.elapsed_time,
                self.score
            );
        }
        self.signal()
    }
}
