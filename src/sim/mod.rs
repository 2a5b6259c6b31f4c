//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or persistence dependencies

pub mod ai;
pub mod collision;
pub mod event;
pub mod powerup;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use event::{GameEvent, ProgressDelta};
pub use powerup::{EFFECT_TABLE, EffectSpec};
pub use snapshot::{BallView, BoosterView, PaddleView, Snapshot};
pub use state::{
    Ball, Booster, BoosterKind, GameMode, GamePhase, GameState, Outcome, Paddle, PaddleRole, Side,
};
pub use tick::{PaddleIntent, TickInput, tick};
