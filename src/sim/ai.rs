//! Computer opponent
//!
//! A bounded-rate tracker: the paddle chases the ball's y at a fraction of
//! its own speed and snaps onto it once within one step. The cap and the
//! lag are what keep it beatable.

use super::state::{Ball, GameMode, Paddle};
use crate::consts::AI_SPEED_FACTOR;

/// Base paddle speed of the AI for a mode
///
/// Endless gets faster every 5 points the human scores. Modes without a
/// curve of their own keep the configured `base_speed`.
pub fn speed_for(mode: GameMode, base_speed: f32, human_score: u32) -> f32 {
    match mode {
        GameMode::Classic => 7.0,
        GameMode::Endless => 7.0 + (human_score / 5) as f32,
        GameMode::TimeAttack => 8.0,
        GameMode::Campaign | GameMode::TwoPlayer => base_speed,
    }
}

/// Vertical position the AI chases: the oldest live ball, else field center
pub fn target_y(balls: &[Ball], field_height: f32) -> f32 {
    balls.first().map_or(field_height / 2.0, |b| b.pos.y)
}

/// Move `paddle` one tick toward `target_y`
pub fn track(paddle: &mut Paddle, target_y: f32, field_height: f32) {
    let step = paddle.speed * AI_SPEED_FACTOR;
    let diff = target_y - paddle.y;
    if diff > step {
        paddle.y += step;
    } else if diff < -step {
        paddle.y -= step;
    } else {
        paddle.y = target_y;
    }
    paddle.clamp_y(field_height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{PaddleRole, Side};
    use glam::Vec2;

    fn ai_paddle(speed: f32) -> Paddle {
        let mut paddle = Paddle::new(Side::Right, PaddleRole::Ai, FIELD_WIDTH, FIELD_HEIGHT);
        paddle.speed = speed;
        paddle
    }

    #[test]
    fn test_speed_curves() {
        assert_eq!(speed_for(GameMode::Classic, PADDLE_SPEED, 30), 7.0);
        assert_eq!(speed_for(GameMode::TimeAttack, PADDLE_SPEED, 0), 8.0);
        assert_eq!(speed_for(GameMode::Endless, PADDLE_SPEED, 0), 7.0);
        assert_eq!(speed_for(GameMode::Endless, PADDLE_SPEED, 4), 7.0);
        assert_eq!(speed_for(GameMode::Endless, PADDLE_SPEED, 5), 8.0);
        assert_eq!(speed_for(GameMode::Endless, PADDLE_SPEED, 17), 10.0);
        assert_eq!(speed_for(GameMode::Campaign, PADDLE_SPEED, 0), PADDLE_SPEED);
        assert_eq!(speed_for(GameMode::Campaign, 11.5, 3), 11.5);
    }

    #[test]
    fn test_moves_at_capped_rate() {
        let mut paddle = ai_paddle(10.0);
        let start = paddle.y;
        track(&mut paddle, start + 100.0, FIELD_HEIGHT);
        assert!((paddle.y - (start + 8.5)).abs() < 1e-4);

        track(&mut paddle, 0.0, FIELD_HEIGHT);
        assert!((paddle.y - start).abs() < 1e-4);
    }

    #[test]
    fn test_snaps_within_one_step() {
        let mut paddle = ai_paddle(10.0);
        let target = paddle.y + 5.0;
        track(&mut paddle, target, FIELD_HEIGHT);
        assert_eq!(paddle.y, target);
    }

    #[test]
    fn test_stays_in_field() {
        let mut paddle = ai_paddle(7.0);
        for _ in 0..500 {
            track(&mut paddle, -1000.0, FIELD_HEIGHT);
        }
        assert_eq!(paddle.y, paddle.height / 2.0);
    }

    #[test]
    fn test_target_is_first_ball() {
        let balls = vec![
            Ball::new(1, Vec2::new(100.0, 50.0), Vec2::ZERO),
            Ball::new(2, Vec2::new(100.0, 600.0), Vec2::ZERO),
        ];
        assert_eq!(target_y(&balls, FIELD_HEIGHT), 50.0);
        assert_eq!(target_y(&[], FIELD_HEIGHT), FIELD_HEIGHT / 2.0);
    }
}
