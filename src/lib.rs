//! Pong Ultimate - a two-paddle arcade Pong with boosters
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, boosters, AI, match rules)
//! - `config`: Match configuration and start-of-match validation
//! - `audio`: Sound cue seam fed by simulation events
//! - `progress`: Coins, unlocks and best scores fed by simulation deltas
//! - `skins`: Immutable cosmetic catalog
//! - `settings`: User preferences
//! - `persistence`: Versioned JSON save files

pub mod audio;
pub mod config;
pub mod error;
pub mod persistence;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod skins;

pub use config::MatchConfig;
pub use error::{ConfigError, PersistenceError, PhaseError};
pub use progress::Progress;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 18.0;
    pub const PADDLE_BASE_HEIGHT: f32 = 110.0;
    pub const PADDLE_MIN_HEIGHT: f32 = 70.0;
    pub const PADDLE_MAX_HEIGHT: f32 = 160.0;
    /// Height change applied by ENLARGE / SHRINK
    pub const PADDLE_RESIZE_STEP: f32 = 40.0;
    /// Human paddle speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 9.0;
    /// Distance of paddle centers from the side edges
    pub const PADDLE_INSET: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Serve speed (pixels per tick)
    pub const BALL_BASE_SPEED: f32 = 6.0;
    /// Speed multiplier on every paddle hit
    pub const PADDLE_BOOST: f32 = 1.05;
    /// Maximum deflection from horizontal on a paddle edge hit (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 70.0;
    /// Serve cone half-width (degrees)
    pub const SERVE_CONE_DEG: f32 = 45.0;

    /// Booster defaults
    pub const BOOSTER_RADIUS: f32 = 22.0;
    /// One-in-N chance per Playing tick of spawning a booster
    pub const BOOSTER_SPAWN_ONE_IN: u32 = 400;
    /// Booster spawn rectangle insets from the field edges
    pub const BOOSTER_INSET_X: f32 = 250.0;
    pub const BOOSTER_INSET_Y: f32 = 150.0;

    /// Combo / energy
    pub const COMBO_MAX: u8 = 5;
    pub const COMBO_WINDOW_MS: u64 = 1000;
    pub const COMBO_DECAY_MS: u64 = 2000;
    pub const ENERGY_MAX: f32 = 100.0;
    pub const ENERGY_PER_HIT: f32 = 15.0;
    pub const ENERGY_REGEN_PER_TICK: f32 = 0.1;

    /// AI tracking speed as a fraction of the paddle speed
    pub const AI_SPEED_FACTOR: f32 = 0.85;

    /// Points needed to win a Classic / TwoPlayer round
    pub const WIN_SCORE: u32 = 10;
}

/// Milliseconds of simulated time elapsed after `ticks` fixed steps
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE as u64
}

/// Velocity vector of magnitude `speed` pointing at `angle_deg` (0° = +x, y down)
#[inline]
pub fn velocity_from_angle(angle_deg: f32, speed: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}
