//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::ai;
use super::collision;
use super::event::{GameEvent, ProgressDelta};
use super::powerup;
use super::rules;
use super::state::{GamePhase, GameState, PaddleRole, Side};

/// Up/down intent for one human paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

impl PaddleIntent {
    pub const UP: Self = Self {
        up: true,
        down: false,
    };
    pub const DOWN: Self = Self {
        up: false,
        down: true,
    };
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left paddle (always human)
    pub left: PaddleIntent,
    /// Right paddle; ignored when it is AI controlled
    pub right: PaddleIntent,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round after RoundOver
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.deltas.clear();

    if input.restart {
        if let Err(err) = state.restart() {
            log::debug!("Ignoring input: {err}");
        }
    }

    if input.pause {
        match state.toggle_pause() {
            Ok(()) if state.phase == GamePhase::Paused => return,
            Ok(()) => {}
            Err(err) => log::debug!("Ignoring input: {err}"),
        }
    }

    // Don't tick if paused or round over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let now = state.now_ms();

    // Combo decay and energy regen
    state.left.tick_meters(now);
    state.right.tick_meters(now);

    powerup::maybe_spawn(state);
    powerup::update_boosters(state);

    update_paddles(state, input);
    update_balls(state);

    // Last ball scored: serve a fresh one
    if state.balls.is_empty() {
        state.spawn_serve_ball();
    }

    let field_height = state.config.field_height;
    powerup::tick_effect(&mut state.left, field_height);
    powerup::tick_effect(&mut state.right, field_height);

    // SCORE_BOOST can change the score without a ball leaving the field
    rules::refresh_ai_speed(state);
    rules::evaluate_round(state);

    state.normalize_order();
}

/// Human intents for human paddles, tracking for the AI
fn update_paddles(state: &mut GameState, input: &TickInput) {
    let field_height = state.config.field_height;
    let target = ai::target_y(&state.balls, field_height);

    for (paddle, intent) in [
        (&mut state.left, input.left),
        (&mut state.right, input.right),
    ] {
        match paddle.role {
            PaddleRole::Human => paddle.drive(intent.up, intent.down, field_height),
            PaddleRole::Ai => ai::track(paddle, target, field_height),
        }
    }
}

/// Move every ball that was live at the start of the loop and resolve its contacts
///
/// Balls cloned by MULTI_BALL during the loop are appended past `live` and
/// first move on the next tick.
fn update_balls(state: &mut GameState) {
    let field_width = state.config.field_width;
    let field_height = state.config.field_height;
    let fallback_speed = state.config.ball_speed;
    let now = state.now_ms();

    let mut live = state.balls.len();
    let mut i = 0;
    while i < live {
        // Nothing scores after the round has been decided
        if state.phase != GamePhase::Playing {
            break;
        }

        let ball = &mut state.balls[i];
        ball.advance();

        if collision::wall_bounce(ball, field_height) {
            state.events.push(GameEvent::WallHit);
        }

        for paddle in [&mut state.left, &mut state.right] {
            if collision::resolve_paddle(ball, paddle, fallback_speed) {
                paddle.register_hit(now);
                state.events.push(GameEvent::PaddleHit { side: paddle.side });
                if paddle.side == Side::Left && paddle.role == PaddleRole::Human {
                    state
                        .deltas
                        .push(ProgressDelta::CoinsEarned(u32::from(paddle.combo)));
                }
            }
        }

        let mut pickups = Vec::new();
        for booster in state.boosters.iter_mut() {
            if collision::touches_booster(ball, booster) {
                booster.active = false;
                pickups.push(booster.kind);
            }
        }
        let collector = powerup::collector_for(ball);
        for kind in pickups {
            powerup::apply(state, kind, collector);
        }
        if state.phase != GamePhase::Playing {
            break;
        }

        if let Some(edge) = collision::exit_side(&state.balls[i], field_width) {
            state.balls.remove(i);
            live -= 1;
            rules::award_point(state, edge.opposite());
            continue;
        }
        i += 1;
    }

    state.boosters.retain(|b| b.active);
}
