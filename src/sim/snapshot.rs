//! Read-only per-tick view for the render collaborator

use glam::Vec2;
use serde::Serialize;

use super::state::{
    Ball, Booster, BoosterKind, GamePhase, GameState, Outcome, Paddle, PaddleRole, Side,
};
use crate::skins::{BallSkin, PaddleSkin};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub skin: BallSkin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleView {
    pub side: Side,
    pub role: PaddleRole,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub score: u32,
    pub combo: u8,
    pub energy: f32,
    pub energy_full: bool,
    pub enlarged: bool,
    pub shrunk: bool,
    pub magnet: bool,
    pub ghost: bool,
    pub skin: PaddleSkin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoosterView {
    pub id: u32,
    pub kind: BoosterKind,
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    pub balls: Vec<BallView>,
    pub left: PaddleView,
    pub right: PaddleView,
    pub boosters: Vec<BoosterView>,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            pos: ball.pos,
            radius: ball.radius,
            skin: ball.skin,
        }
    }
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            side: paddle.side,
            role: paddle.role,
            pos: Vec2::new(paddle.x, paddle.y),
            width: paddle.width,
            height: paddle.height,
            score: paddle.score,
            combo: paddle.combo,
            energy: paddle.energy,
            energy_full: paddle.energy_full(),
            enlarged: paddle.is_enlarged(),
            shrunk: paddle.is_shrunk(),
            magnet: paddle.magnet,
            ghost: paddle.ghost,
            skin: paddle.skin,
        }
    }
}

impl From<&Booster> for BoosterView {
    fn from(booster: &Booster) -> Self {
        Self {
            id: booster.id,
            kind: booster.kind,
            pos: booster.pos,
            radius: booster.radius,
            active: booster.active,
        }
    }
}

impl GameState {
    /// Render view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            phase: self.phase,
            outcome: self.outcome,
            balls: self.balls.iter().map(BallView::from).collect(),
            left: PaddleView::from(&self.left),
            right: PaddleView::from(&self.right),
            boosters: self.boosters.iter().map(BoosterView::from).collect(),
        }
    }
}
