//! Boosters: spawning, pickup effects and the per-paddle effect timer
//!
//! Durations live in [`EFFECT_TABLE`] rather than at the call sites. Timed
//! effects (ENLARGE, SHRINK, MAGNET, GHOST) share one timer per paddle; a new
//! timed effect overwrites the timer, it never stacks.

use glam::Vec2;
use rand::Rng;

use super::event::{GameEvent, ProgressDelta};
use super::rules;
use super::state::{Ball, Booster, BoosterKind, GameState, Paddle, Side};
use crate::consts::*;

/// Velocity multiplier of SPEED_UP
pub const SPEED_UP_FACTOR: f32 = 1.4;
/// Velocity multiplier of SLOW_DOWN
pub const SLOW_DOWN_FACTOR: f32 = 0.6;
/// MULTI_BALL clones at most this many of the oldest live balls
pub const MULTI_BALL_SOURCES: usize = 2;
/// Range of the clone's mirrored vx scale
pub const MULTI_BALL_VX_JITTER: (f32, f32) = (0.8, 1.2);
/// Range of the clone's vy offset
pub const MULTI_BALL_VY_JITTER: f32 = 3.0;
/// Coins granted by SCORE_BOOST
pub const SCORE_BOOST_COINS: u32 = 5;

/// Static description of a booster kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    pub kind: BoosterKind,
    /// Ticks on the paddle timer; `None` for instantaneous effects
    pub duration_ticks: Option<u32>,
}

/// Per-kind effect configuration (ticks at 60 Hz)
pub const EFFECT_TABLE: [EffectSpec; 8] = [
    EffectSpec {
        kind: BoosterKind::SpeedUp,
        duration_ticks: None,
    },
    EffectSpec {
        kind: BoosterKind::SlowDown,
        duration_ticks: None,
    },
    EffectSpec {
        kind: BoosterKind::Enlarge,
        duration_ticks: Some(400),
    },
    EffectSpec {
        kind: BoosterKind::Shrink,
        duration_ticks: Some(400),
    },
    EffectSpec {
        kind: BoosterKind::MultiBall,
        duration_ticks: None,
    },
    EffectSpec {
        kind: BoosterKind::ScoreBoost,
        duration_ticks: None,
    },
    EffectSpec {
        kind: BoosterKind::Magnet,
        duration_ticks: Some(300),
    },
    EffectSpec {
        kind: BoosterKind::Ghost,
        duration_ticks: Some(250),
    },
];

/// Table entry for `kind`
pub fn spec(kind: BoosterKind) -> EffectSpec {
    EFFECT_TABLE
        .iter()
        .copied()
        .find(|s| s.kind == kind)
        .unwrap_or(EffectSpec {
            kind,
            duration_ticks: None,
        })
}

/// Roll the one-in-N spawn gate and place a booster inside the inset zone
pub fn maybe_spawn(state: &mut GameState) {
    if state.rng.random_range(0..state.config.booster_chance) != 0 {
        return;
    }

    let kind = BoosterKind::ALL[state.rng.random_range(0..BoosterKind::ALL.len())];
    let x = state
        .rng
        .random_range(BOOSTER_INSET_X..=state.config.field_width - BOOSTER_INSET_X);
    let y = state
        .rng
        .random_range(BOOSTER_INSET_Y..=state.config.field_height - BOOSTER_INSET_Y);
    let id = state.next_entity_id();
    state.boosters.push(Booster::new(id, kind, Vec2::new(x, y)));
    log::debug!("Booster {kind:?} spawned at ({x:.0}, {y:.0})");
}

/// Age boosters, drop collected ones and, if configured, expired ones
pub fn update_boosters(state: &mut GameState) {
    let expiry = state.config.booster_expiry_ticks;
    for booster in state.boosters.iter_mut() {
        booster.age_ticks = booster.age_ticks.saturating_add(1);
        if expiry.is_some_and(|limit| booster.age_ticks >= limit) {
            booster.active = false;
        }
    }
    state.boosters.retain(|b| b.active);
}

/// Paddle credited with a pickup: the one the ball is travelling away from
pub fn collector_for(ball: &Ball) -> Side {
    if ball.vel.x > 0.0 {
        Side::Left
    } else {
        Side::Right
    }
}

/// Apply a collected booster on behalf of `collector`
pub fn apply(state: &mut GameState, kind: BoosterKind, collector: Side) {
    state.events.push(GameEvent::Booster { kind });
    let field_height = state.config.field_height;

    match kind {
        BoosterKind::SpeedUp => scale_ball_speed(&mut state.balls, SPEED_UP_FACTOR),
        BoosterKind::SlowDown => scale_ball_speed(&mut state.balls, SLOW_DOWN_FACTOR),
        BoosterKind::Enlarge | BoosterKind::Magnet | BoosterKind::Ghost => {
            apply_timed(state.paddle_mut(collector), kind, field_height);
        }
        BoosterKind::Shrink => {
            apply_timed(state.paddle_mut(collector.opposite()), kind, field_height);
        }
        BoosterKind::MultiBall => {
            spawn_clones(state);
            state.events.push(GameEvent::MultiBall);
        }
        BoosterKind::ScoreBoost => {
            state.paddle_mut(collector).score += 1;
            let (left, right) = state.scores();
            state.deltas.push(ProgressDelta::ScoreChanged { left, right });
            state.deltas.push(ProgressDelta::CoinsEarned(SCORE_BOOST_COINS));
            rules::evaluate_round(state);
        }
    }
    log::debug!("Booster {kind:?} applied for {collector:?}");
}

fn scale_ball_speed(balls: &mut [Ball], factor: f32) {
    for ball in balls {
        ball.vel *= factor;
    }
}

/// Mirror up to the first MULTI_BALL_SOURCES live balls with jitter
fn spawn_clones(state: &mut GameState) {
    let sources: Vec<(Vec2, Vec2)> = state
        .balls
        .iter()
        .take(MULTI_BALL_SOURCES)
        .map(|b| (b.pos, b.vel))
        .collect();

    for (pos, vel) in sources {
        let (lo, hi) = MULTI_BALL_VX_JITTER;
        let vx = -vel.x * state.rng.random_range(lo..=hi);
        let vy = vel.y + state.rng.random_range(-MULTI_BALL_VY_JITTER..=MULTI_BALL_VY_JITTER);
        let id = state.next_entity_id();
        let mut clone = Ball::new(id, pos, Vec2::new(vx, vy));
        clone.skin = state.config.ball_skin;
        state.balls.push(clone);
    }
}

/// Start a timed effect on `paddle`, overwriting any running timer
pub fn apply_timed(paddle: &mut Paddle, kind: BoosterKind, field_height: f32) {
    let Some(duration) = spec(kind).duration_ticks else {
        return;
    };
    match kind {
        BoosterKind::Enlarge => {
            paddle.height = (paddle.base_height + PADDLE_RESIZE_STEP).min(PADDLE_MAX_HEIGHT);
        }
        BoosterKind::Shrink => {
            paddle.height = (paddle.base_height - PADDLE_RESIZE_STEP).max(PADDLE_MIN_HEIGHT);
        }
        // TODO: ball attraction toward the paddle once magnet physics is designed
        BoosterKind::Magnet => paddle.magnet = true,
        // TODO: paddle intangibility once ghost physics is designed
        BoosterKind::Ghost => paddle.ghost = true,
        _ => {}
    }
    paddle.effect_ticks = duration;
    paddle.clamp_y(field_height);
}

/// Count down the paddle's effect timer; revert everything when it hits zero
pub fn tick_effect(paddle: &mut Paddle, field_height: f32) {
    if paddle.effect_ticks == 0 {
        return;
    }
    paddle.effect_ticks -= 1;
    if paddle.effect_ticks == 0 {
        paddle.height = paddle.base_height;
        paddle.magnet = false;
        paddle.ghost = false;
        paddle.clamp_y(field_height);
    }
}
