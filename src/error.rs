//! Error types
//!
//! The simulation itself is a closed numeric system; errors only arise at its
//! edges: match-start validation, illegal phase transitions and save files.

use thiserror::Error;

use crate::sim::GamePhase;

/// Rejected match configuration. Raised before any tick runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("field {width}x{height} is too small (need at least {min_width}x{min_height})")]
    FieldTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },

    #[error("win score must be at least 1")]
    ZeroWinScore,

    #[error("booster chance must be one-in-N with N >= 1")]
    ZeroBoosterChance,

    #[error("unknown game mode `{0}`")]
    UnknownMode(String),

    #[error("malformed match config: {0}")]
    Parse(String),
}

/// A state machine request that is not legal from the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} while {from:?}")]
pub struct PhaseError {
    pub from: GamePhase,
    pub action: &'static str,
}

/// Failure reading or writing a save file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a `{expected}` save, found `{found}`")]
    Kind { expected: String, found: String },

    #[error("save `{kind}` has version {found}, expected {expected}")]
    Version {
        kind: String,
        found: u32,
        expected: u32,
    },
}
