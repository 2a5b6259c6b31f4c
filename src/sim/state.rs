//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Positions are in field
//! pixels with y pointing down; velocities are pixels per tick.

use std::str::FromStr;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai;
use super::collision::Aabb;
use super::event::{GameEvent, ProgressDelta};
use crate::config::MatchConfig;
use crate::consts::*;
use crate::error::ConfigError;
use crate::skins::{BallSkin, PaddleSkin};
use crate::{ticks_to_ms, velocity_from_angle};

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; no timers advance
    Paused,
    /// Terminal condition reached, waiting for restart
    RoundOver,
}

/// Match mode, fixed at match start
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum GameMode {
    #[default]
    Classic,
    Endless,
    TwoPlayer,
    TimeAttack,
    Campaign,
}

impl GameMode {
    pub const ALL: [GameMode; 5] = [
        GameMode::Classic,
        GameMode::Endless,
        GameMode::TwoPlayer,
        GameMode::TimeAttack,
        GameMode::Campaign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Endless => "Endless",
            GameMode::TwoPlayer => "2 Players",
            GameMode::TimeAttack => "Time Attack",
            GameMode::Campaign => "Campaign",
        }
    }

    /// Whether the right paddle is computer controlled
    pub fn has_ai(&self) -> bool {
        *self != GameMode::TwoPlayer
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "classic" => Ok(GameMode::Classic),
            "endless" => Ok(GameMode::Endless),
            "twoplayer" | "2players" | "2player" => Ok(GameMode::TwoPlayer),
            "timeattack" => Ok(GameMode::TimeAttack),
            "campaign" => Ok(GameMode::Campaign),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Field side; also identifies the paddle defending it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of vx for a ball travelling away from this side's paddle
    pub fn away_sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleRole {
    Human,
    Ai,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Render hint only
    pub skin: BallSkin,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: BALL_RADIUS,
            skin: BallSkin::Classic,
        }
    }

    /// Ball at `center` heading into one of the two serve cones
    pub fn serve(id: u32, center: Vec2, speed: f32, rng: &mut Pcg32) -> Self {
        let angle = if rng.random_bool(0.5) {
            rng.random_range(-SERVE_CONE_DEG..=SERVE_CONE_DEG)
        } else {
            rng.random_range(180.0 - SERVE_CONE_DEG..=180.0 + SERVE_CONE_DEG)
        };
        Self::new(id, center, velocity_from_angle(angle, speed))
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A paddle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub role: PaddleRole,
    /// Center x (fixed)
    pub x: f32,
    /// Center y, kept within [height/2, field_height - height/2]
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub base_height: f32,
    /// Pixels per tick
    pub speed: f32,
    pub score: u32,
    /// Consecutive quick hits, 0..=COMBO_MAX
    pub combo: u8,
    /// Simulated time of the last hit
    pub last_hit_ms: Option<u64>,
    /// 0..=ENERGY_MAX
    pub energy: f32,
    /// Ticks left on the shared power-up timer
    pub effect_ticks: u32,
    pub magnet: bool,
    pub ghost: bool,
    /// Render hint only
    pub skin: PaddleSkin,
}

impl Paddle {
    pub fn new(side: Side, role: PaddleRole, field_width: f32, field_height: f32) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => field_width - PADDLE_INSET,
        };
        Self {
            side,
            role,
            x,
            y: field_height / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_BASE_HEIGHT,
            base_height: PADDLE_BASE_HEIGHT,
            speed: PADDLE_SPEED,
            score: 0,
            combo: 0,
            last_hit_ms: None,
            energy: 0.0,
            effect_ticks: 0,
            magnet: false,
            ghost: false,
            skin: PaddleSkin::Classic,
        }
    }

    /// Bounding rectangle
    pub fn rect(&self) -> Aabb {
        Aabb::from_center_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Keep the paddle fully inside the field
    pub fn clamp_y(&mut self, field_height: f32) {
        let half = self.height / 2.0;
        self.y = self.y.clamp(half, field_height - half);
    }

    /// Apply one tick of human input
    pub fn drive(&mut self, up: bool, down: bool, field_height: f32) {
        if up {
            self.y -= self.speed;
        }
        if down {
            self.y += self.speed;
        }
        self.clamp_y(field_height);
    }

    /// Record a successful ball hit at `now_ms`
    pub fn register_hit(&mut self, now_ms: u64) {
        let quick = self
            .last_hit_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < COMBO_WINDOW_MS);
        self.combo = if quick {
            (self.combo + 1).min(COMBO_MAX)
        } else {
            1
        };
        self.last_hit_ms = Some(now_ms);
        self.energy = (self.energy + ENERGY_PER_HIT).min(ENERGY_MAX);
    }

    /// Per-tick combo decay and energy regeneration
    pub fn tick_meters(&mut self, now_ms: u64) {
        let idle = self
            .last_hit_ms
            .is_none_or(|last| now_ms.saturating_sub(last) > COMBO_DECAY_MS);
        if idle {
            self.combo = 0;
        }
        self.energy = (self.energy + ENERGY_REGEN_PER_TICK).min(ENERGY_MAX);
    }

    /// Energy meter is full (observable only)
    pub fn energy_full(&self) -> bool {
        self.energy >= ENERGY_MAX
    }

    pub fn is_enlarged(&self) -> bool {
        self.height > self.base_height
    }

    pub fn is_shrunk(&self) -> bool {
        self.height < self.base_height
    }

    /// Reset everything a new match resets
    pub fn reset(&mut self, field_height: f32) {
        self.y = field_height / 2.0;
        self.height = self.base_height;
        self.score = 0;
        self.combo = 0;
        self.last_hit_ms = None;
        self.energy = 0.0;
        self.effect_ticks = 0;
        self.magnet = false;
        self.ghost = false;
    }
}

/// Booster kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoosterKind {
    SpeedUp,
    SlowDown,
    Enlarge,
    Shrink,
    MultiBall,
    ScoreBoost,
    Magnet,
    Ghost,
}

impl BoosterKind {
    pub const ALL: [BoosterKind; 8] = [
        BoosterKind::SpeedUp,
        BoosterKind::SlowDown,
        BoosterKind::Enlarge,
        BoosterKind::Shrink,
        BoosterKind::MultiBall,
        BoosterKind::ScoreBoost,
        BoosterKind::Magnet,
        BoosterKind::Ghost,
    ];
}

/// A booster pickup on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booster {
    pub id: u32,
    pub kind: BoosterKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Cleared the moment a ball collects it
    pub active: bool,
    /// Ticks since spawn
    pub age_ticks: u32,
}

impl Booster {
    pub fn new(id: u32, kind: BoosterKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: BOOSTER_RADIUS,
            active: true,
            age_ticks: 0,
        }
    }
}

/// Complete match state (the match context)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Immutable for the duration of the match
    pub config: MatchConfig,
    /// Match RNG; every random draw goes through here
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Set when the phase becomes RoundOver
    pub outcome: Option<Outcome>,
    /// Ticks simulated since match start (frozen while paused)
    pub time_ticks: u64,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    pub left: Paddle,
    pub right: Paddle,
    /// Live boosters (sorted by id)
    pub boosters: Vec<Booster>,
    /// Cues produced by the last tick, in occurrence order
    pub events: Vec<GameEvent>,
    /// Progress deltas produced by the last tick
    pub deltas: Vec<ProgressDelta>,
    next_id: u32,
}

impl GameState {
    /// Validate the config and set up a fresh match seeded from `config.seed`
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Like [`GameState::new`] with a caller-supplied generator
    pub fn with_rng(config: MatchConfig, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;

        let right_role = if config.mode.has_ai() {
            PaddleRole::Ai
        } else {
            PaddleRole::Human
        };
        let mut state = Self {
            left: Paddle::new(
                Side::Left,
                PaddleRole::Human,
                config.field_width,
                config.field_height,
            ),
            right: Paddle::new(Side::Right, right_role, config.field_width, config.field_height),
            config,
            rng,
            phase: GamePhase::Playing,
            outcome: None,
            time_ticks: 0,
            balls: Vec::new(),
            boosters: Vec::new(),
            events: Vec::new(),
            deltas: Vec::new(),
            next_id: 1,
        };
        state.reset_match();

        log::info!(
            "Match started: mode={} seed={}",
            state.config.mode.as_str(),
            state.config.seed
        );
        Ok(state)
    }

    /// Reinitialize paddles, balls and boosters for a new match
    pub(crate) fn reset_match(&mut self) {
        let field_height = self.config.field_height;
        for paddle in [&mut self.left, &mut self.right] {
            paddle.reset(field_height);
            paddle.speed = self.config.paddle_speed;
            paddle.skin = self.config.paddle_skin;
        }
        if self.right.role == PaddleRole::Ai {
            self.right.speed = ai::speed_for(self.config.mode, self.config.paddle_speed, 0);
        }

        self.phase = GamePhase::Playing;
        self.outcome = None;
        self.time_ticks = 0;
        self.balls.clear();
        self.boosters.clear();
        self.events.clear();
        self.deltas.clear();
        self.spawn_serve_ball();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.config.field_width / 2.0, self.config.field_height / 2.0)
    }

    /// Simulated milliseconds since match start
    pub fn now_ms(&self) -> u64 {
        ticks_to_ms(self.time_ticks)
    }

    /// Spawn a ball at field center in a random serve cone
    pub fn spawn_serve_ball(&mut self) {
        let id = self.next_entity_id();
        let center = self.field_center();
        let mut ball = Ball::serve(id, center, self.config.ball_speed, &mut self.rng);
        ball.skin = self.config.ball_skin;
        self.balls.push(ball);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Score pair as (left, right)
    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.boosters.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(MatchConfig::default().with_seed(42)).unwrap()
    }

    #[test]
    fn test_new_match() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
        assert!(state.boosters.is_empty());
        assert_eq!(state.left.role, PaddleRole::Human);
        assert_eq!(state.right.role, PaddleRole::Ai);
        assert_eq!(state.left.y, FIELD_HEIGHT / 2.0);
        assert_eq!(state.right.x, FIELD_WIDTH - PADDLE_INSET);
    }

    #[test]
    fn test_two_player_has_no_ai() {
        let state = GameState::new(MatchConfig::for_mode(GameMode::TwoPlayer)).unwrap();
        assert_eq!(state.right.role, PaddleRole::Human);
        assert_eq!(state.right.speed, PADDLE_SPEED);
    }

    #[test]
    fn test_campaign_ai_uses_configured_speed() {
        let config = MatchConfig {
            paddle_speed: 13.0,
            ..MatchConfig::for_mode(GameMode::Campaign)
        };
        let state = GameState::new(config).unwrap();
        assert_eq!(state.right.role, PaddleRole::Ai);
        assert_eq!(state.right.speed, 13.0);
    }

    #[test]
    fn test_invalid_config_fails_before_start() {
        let config = MatchConfig {
            field_width: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(config).is_err());
    }

    #[test]
    fn test_serve_ball_in_cone() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let ball = Ball::serve(id, Vec2::new(640.0, 360.0), BALL_BASE_SPEED, &mut rng);
            assert!((ball.speed() - BALL_BASE_SPEED).abs() < 1e-4);
            let angle = ball.vel.y.atan2(ball.vel.x).to_degrees();
            let in_right_cone = (-45.001..=45.001).contains(&angle);
            let in_left_cone = angle.abs() >= 134.999;
            assert!(in_right_cone || in_left_cone, "angle {angle} outside serve cones");
        }
    }

    #[test]
    fn test_paddle_drive_clamps() {
        let mut paddle = Paddle::new(Side::Left, PaddleRole::Human, FIELD_WIDTH, FIELD_HEIGHT);
        for _ in 0..200 {
            paddle.drive(true, false, FIELD_HEIGHT);
        }
        assert_eq!(paddle.y, paddle.height / 2.0);
        for _ in 0..200 {
            paddle.drive(false, true, FIELD_HEIGHT);
        }
        assert_eq!(paddle.y, FIELD_HEIGHT - paddle.height / 2.0);
    }

    #[test]
    fn test_combo_window() {
        let mut paddle = Paddle::new(Side::Left, PaddleRole::Human, FIELD_WIDTH, FIELD_HEIGHT);
        paddle.register_hit(5000);
        assert_eq!(paddle.combo, 1);
        paddle.register_hit(5999);
        assert_eq!(paddle.combo, 2);
        // Exactly 1000 ms apart is not quick
        paddle.register_hit(6999);
        assert_eq!(paddle.combo, 1);

        for i in 1..10 {
            paddle.register_hit(6999 + i * 100);
        }
        assert_eq!(paddle.combo, COMBO_MAX);
    }

    #[test]
    fn test_combo_decay_and_energy() {
        let mut paddle = Paddle::new(Side::Left, PaddleRole::Human, FIELD_WIDTH, FIELD_HEIGHT);
        paddle.register_hit(1000);
        paddle.register_hit(1500);
        assert_eq!(paddle.combo, 2);
        assert!((paddle.energy - 30.0).abs() < 1e-4);

        paddle.tick_meters(3500);
        assert_eq!(paddle.combo, 2, "2000 ms idle is not yet decay");
        paddle.tick_meters(3501);
        assert_eq!(paddle.combo, 0);

        for _ in 0..2000 {
            paddle.tick_meters(4000);
        }
        assert_eq!(paddle.energy, ENERGY_MAX);
        assert!(paddle.energy_full());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("classic".parse::<GameMode>(), Ok(GameMode::Classic));
        assert_eq!("2 Players".parse::<GameMode>(), Ok(GameMode::TwoPlayer));
        assert_eq!("time_attack".parse::<GameMode>(), Ok(GameMode::TimeAttack));
        assert!(matches!(
            "arcade".parse::<GameMode>(),
            Err(ConfigError::UnknownMode(_))
        ));
    }
}
