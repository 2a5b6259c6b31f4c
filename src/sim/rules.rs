//! Match state machine
//!
//! Playing, Paused and RoundOver, plus the per-mode terminal conditions.
//! Classic and TwoPlayer end at the win score; the other modes only end
//! through [`GameState::end_round`].

use super::ai;
use super::event::{GameEvent, ProgressDelta};
use super::state::{GameMode, GamePhase, GameState, Outcome, PaddleRole, Side};
use crate::error::PhaseError;

/// Coins for a Classic win by the local player
pub const CLASSIC_WIN_COINS: u32 = 50;
/// Base coins for a point scored by the local player (combo is added)
pub const POINT_COINS: u32 = 2;

/// Score that ends the round in `mode`, if any
pub fn win_threshold(mode: GameMode, win_score: u32) -> Option<u32> {
    match mode {
        GameMode::Classic | GameMode::TwoPlayer => Some(win_score),
        GameMode::Endless | GameMode::TimeAttack | GameMode::Campaign => None,
    }
}

/// Credit one point to `scorer` and run the win check
pub fn award_point(state: &mut GameState, scorer: Side) {
    let paddle = state.paddle_mut(scorer);
    paddle.score += 1;
    let combo = u32::from(paddle.combo);

    state.events.push(GameEvent::Score { side: scorer });
    let (left, right) = state.scores();
    state.deltas.push(ProgressDelta::ScoreChanged { left, right });
    if scorer == Side::Left {
        state.deltas.push(ProgressDelta::CoinsEarned(POINT_COINS + combo));
    }
    log::debug!("{scorer:?} scores: {left}-{right}");

    refresh_ai_speed(state);
    evaluate_round(state);
}

/// Re-derive the AI paddle speed from the current score
pub fn refresh_ai_speed(state: &mut GameState) {
    if state.right.role == PaddleRole::Ai {
        state.right.speed =
            ai::speed_for(state.config.mode, state.config.paddle_speed, state.left.score);
    }
}

/// End the round if the mode's threshold has been reached
///
/// Returns true if this call moved the match to RoundOver.
pub fn evaluate_round(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let Some(threshold) = win_threshold(state.config.mode, state.config.win_score) else {
        return false;
    };

    let winner = if state.left.score >= threshold {
        Side::Left
    } else if state.right.score >= threshold {
        Side::Right
    } else {
        return false;
    };
    finish(state, Outcome::Winner(winner));
    true
}

/// Outcome decided purely by comparing scores
pub fn outcome_by_score(left: u32, right: u32) -> Outcome {
    match left.cmp(&right) {
        std::cmp::Ordering::Greater => Outcome::Winner(Side::Left),
        std::cmp::Ordering::Less => Outcome::Winner(Side::Right),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

fn finish(state: &mut GameState, outcome: Outcome) {
    state.phase = GamePhase::RoundOver;
    state.outcome = Some(outcome);

    match outcome {
        Outcome::Winner(Side::Left) => {
            state.events.push(GameEvent::Win);
            if state.config.mode == GameMode::Classic {
                state.deltas.push(ProgressDelta::CoinsEarned(CLASSIC_WIN_COINS));
            }
        }
        Outcome::Winner(Side::Right) => state.events.push(GameEvent::Lose),
        Outcome::Draw => {}
    }

    let (left, right) = state.scores();
    log::info!(
        "Round over ({}): {outcome:?} at {left}-{right} after {} ticks",
        state.config.mode.as_str(),
        state.time_ticks
    );
}

impl GameState {
    /// Playing -> Paused
    pub fn pause(&mut self) -> Result<(), PhaseError> {
        self.transition(GamePhase::Playing, GamePhase::Paused, "pause")
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> Result<(), PhaseError> {
        self.transition(GamePhase::Paused, GamePhase::Playing, "resume")
    }

    /// Pause if playing, resume if paused
    pub fn toggle_pause(&mut self) -> Result<(), PhaseError> {
        match self.phase {
            GamePhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// RoundOver -> Playing with every paddle, ball and booster reinitialized
    pub fn restart(&mut self) -> Result<(), PhaseError> {
        if self.phase != GamePhase::RoundOver {
            return Err(PhaseError {
                from: self.phase,
                action: "restart",
            });
        }
        self.reset_match();
        log::info!("Match restarted: mode={}", self.config.mode.as_str());
        Ok(())
    }

    /// External round end (time limit, level boundary); winner by score
    pub fn end_round(&mut self) -> Result<Outcome, PhaseError> {
        if self.phase == GamePhase::RoundOver {
            return Err(PhaseError {
                from: self.phase,
                action: "end round",
            });
        }
        let outcome = outcome_by_score(self.left.score, self.right.score);
        finish(self, outcome);
        Ok(outcome)
    }

    fn transition(
        &mut self,
        from: GamePhase,
        to: GamePhase,
        action: &'static str,
    ) -> Result<(), PhaseError> {
        if self.phase != from {
            return Err(PhaseError {
                from: self.phase,
                action,
            });
        }
        self.phase = to;
        log::debug!("Phase {from:?} -> {to:?}");
        Ok(())
    }
}
