//! Discrete outputs of a tick
//!
//! Cues for the audio layer and monotonic deltas for the progress layer.
//! Both are collected in occurrence order and replaced every tick.

use serde::{Deserialize, Serialize};

use super::state::{BoosterKind, Side};

/// A cue fired by the simulation, one per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit { side: Side },
    /// `side` is the paddle that earned the point
    Score { side: Side },
    Booster { kind: BoosterKind },
    MultiBall,
    /// Round won by the left (local) player
    Win,
    /// Round lost by the left (local) player
    Lose,
}

impl GameEvent {
    /// Stable cue name
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::WallHit => "wall_hit",
            GameEvent::PaddleHit { .. } => "paddle_hit",
            GameEvent::Score { .. } => "score",
            GameEvent::Booster { .. } => "booster",
            GameEvent::MultiBall => "multi_ball",
            GameEvent::Win => "win",
            GameEvent::Lose => "lose",
        }
    }
}

/// Change to persistent player progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressDelta {
    CoinsEarned(u32),
    ScoreChanged { left: u32, right: u32 },
}
