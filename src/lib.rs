//! Sky Angel - A 2D arcade flight game
//!
//! Core modules:
//! - `sim`: Flight simulation (world model, tick, fuel decay)
//! - `session`: Host driver that owns a world and its clocks
//! - `platform`: Clock handles and input mapping
//! - `persistence`: JSON save/load for settings and scores
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod scenery;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::{Session, SessionObserver, SessionPhase};
pub use settings::{DifficultyPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (logical pixels)
    pub const FIELD_WIDTH: u32 = 1024;
    pub const FIELD_HEIGHT: u32 = 768;

    /// Seconds per fuel unit
    pub const DECAY_INTERVAL_SECS: f32 = 1.0;
    /// Presentation frames per second for the headless driver
    pub const FRAME_RATE: u32 = 60;

    /// Background clouds per session
    pub const CLOUD_COUNT: usize = 5;
}
