//! Property tests over the public simulation API

use glam::Vec2;
use proptest::prelude::*;

use pong_ultimate::MatchConfig;
use pong_ultimate::consts::*;
use pong_ultimate::sim::collision::paddle_bounce_velocity;
use pong_ultimate::sim::powerup;
use pong_ultimate::sim::{
    Ball, BoosterKind, GameMode, GamePhase, GameState, Paddle, PaddleIntent, PaddleRole, Side,
    TickInput, tick,
};

fn any_mode() -> impl Strategy<Value = GameMode> {
    prop::sample::select(GameMode::ALL.to_vec())
}

fn any_intent() -> impl Strategy<Value = PaddleIntent> {
    (any::<bool>(), any::<bool>()).prop_map(|(up, down)| PaddleIntent { up, down })
}

fn any_input() -> impl Strategy<Value = TickInput> {
    (any_intent(), any_intent(), prop::bool::weighted(0.02)).prop_map(|(left, right, pause)| {
        TickInput {
            left,
            right,
            pause,
            restart: true,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn paddles_never_leave_the_field(
        seed in any::<u64>(),
        mode in any_mode(),
        inputs in prop::collection::vec(any_input(), 1..600),
    ) {
        let config = MatchConfig {
            booster_chance: 20,
            ..MatchConfig::for_mode(mode).with_seed(seed)
        };
        let mut state = GameState::new(config).unwrap();
        for input in &inputs {
            tick(&mut state, input);
            for paddle in [&state.left, &state.right] {
                prop_assert!(paddle.y >= paddle.height / 2.0);
                prop_assert!(paddle.y <= FIELD_HEIGHT - paddle.height / 2.0);
                prop_assert!(paddle.height >= PADDLE_MIN_HEIGHT);
                prop_assert!(paddle.height <= PADDLE_MAX_HEIGHT);
                prop_assert!(paddle.combo <= COMBO_MAX);
                prop_assert!(paddle.energy <= ENERGY_MAX);
            }
            prop_assert!(!state.balls.is_empty());
            for ball in &state.balls {
                prop_assert!(ball.pos.is_finite() && ball.vel.is_finite());
            }
        }
    }

    #[test]
    fn paddle_hit_speeds_ball_up_five_percent(
        vx in 0.5f32..20.0,
        vy in -12.0f32..12.0,
        offset in -150.0f32..150.0,
        right in any::<bool>(),
    ) {
        let side = if right { Side::Right } else { Side::Left };
        let paddle = Paddle::new(side, PaddleRole::Human, FIELD_WIDTH, FIELD_HEIGHT);
        let incoming = Vec2::new(-side.away_sign() * vx, vy);

        let out = paddle_bounce_velocity(paddle.y + offset, incoming, &paddle, BALL_BASE_SPEED);

        let expected = incoming.length() * PADDLE_BOOST;
        prop_assert!((out.length() - expected).abs() <= expected * 1e-5);
        // Always sent back toward the opponent, never steeper than the max angle
        prop_assert!(out.x * side.away_sign() > 0.0);
        let angle = out.y.abs().atan2(out.x.abs()).to_degrees();
        prop_assert!(angle <= MAX_BOUNCE_ANGLE_DEG + 1e-3);
    }

    #[test]
    fn combo_counts_quick_hits_up_to_cap(gaps in prop::collection::vec(0u64..3_000, 1..40)) {
        let mut paddle = Paddle::new(Side::Left, PaddleRole::Human, FIELD_WIDTH, FIELD_HEIGHT);
        let mut now = 10_000;
        let mut expected: u8 = 0;
        for (i, gap) in gaps.iter().enumerate() {
            now += gap;
            paddle.register_hit(now);
            expected = if i > 0 && *gap < COMBO_WINDOW_MS {
                (expected + 1).min(COMBO_MAX)
            } else {
                1
            };
            prop_assert_eq!(paddle.combo, expected);
        }
        paddle.tick_meters(now + COMBO_DECAY_MS + 1);
        prop_assert_eq!(paddle.combo, 0);
    }

    #[test]
    fn multi_ball_mirrors_each_source(
        seed in any::<u64>(),
        vx0 in 1.0f32..10.0,
        vx1 in -10.0f32..-1.0,
    ) {
        let mut state = GameState::new(MatchConfig::default().with_seed(seed)).unwrap();
        let (a, b) = (state.next_entity_id(), state.next_entity_id());
        state.balls = vec![
            Ball::new(a, Vec2::new(400.0, 200.0), Vec2::new(vx0, 1.0)),
            Ball::new(b, Vec2::new(800.0, 500.0), Vec2::new(vx1, -2.0)),
        ];

        powerup::apply(&mut state, BoosterKind::MultiBall, Side::Left);

        prop_assert_eq!(state.balls.len(), 4);
        for (src, clone) in [(0, 2), (1, 3)] {
            let (src, clone) = (&state.balls[src], &state.balls[clone]);
            prop_assert!(src.vel.x * clone.vel.x < 0.0);
        }
    }
}

#[test]
fn center_hit_scenario() {
    let config = MatchConfig {
        booster_chance: u32::MAX,
        ..MatchConfig::default().with_seed(1)
    };
    let mut state = GameState::new(config).unwrap();
    assert_eq!(state.left.y, 360.0);
    assert_eq!(state.left.height, 110.0);

    let id = state.next_entity_id();
    state.balls = vec![Ball::new(id, Vec2::new(640.0, 360.0), Vec2::new(-6.0, 0.0))];

    // Ball travels straight left until it meets the paddle
    let mut hit_tick = None;
    for t in 0..200 {
        tick(&mut state, &TickInput::default());
        if state.left.combo == 1 {
            hit_tick = Some(t);
            break;
        }
    }
    assert!(hit_tick.is_some(), "ball never reached the left paddle");

    let ball = &state.balls[0];
    assert!((ball.vel.x - 6.3).abs() < 1e-4);
    assert!(ball.vel.y.abs() < 1e-6);
    assert_eq!(ball.pos.y, 360.0);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn classic_round_ends_exactly_at_win_score() {
    let config = MatchConfig {
        booster_chance: u32::MAX,
        ..MatchConfig::for_mode(GameMode::Classic).with_seed(2)
    };
    let mut state = GameState::new(config).unwrap();

    for expected in 1..=10u32 {
        let id = state.next_entity_id();
        state.balls = vec![Ball::new(id, Vec2::new(FIELD_WIDTH - 2.0, 60.0), Vec2::new(6.0, 0.0))];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.left.score, expected);
        let over = state.phase == GamePhase::RoundOver;
        assert_eq!(over, expected == 10, "round over at {expected}");
    }
}
