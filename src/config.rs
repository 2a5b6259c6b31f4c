//! Match configuration
//!
//! Chosen once at match start and immutable for the duration of the match.
//! Everything here is validated before the first tick runs.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::GameMode;
use crate::skins::{BallSkin, PaddleSkin};

/// Match setup supplied by the menu layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub mode: GameMode,
    /// Seed for the match RNG (booster spawns, serve angles, multi-ball jitter)
    pub seed: u64,
    pub field_width: f32,
    pub field_height: f32,
    /// Human paddle speed (pixels per tick)
    pub paddle_speed: f32,
    /// Serve speed (pixels per tick)
    pub ball_speed: f32,
    /// Points needed to end a Classic / TwoPlayer round
    pub win_score: u32,
    /// One-in-N chance per Playing tick of spawning a booster
    pub booster_chance: u32,
    /// Uncollected boosters despawn after this many ticks (`None` = never)
    pub booster_expiry_ticks: Option<u32>,
    /// Cosmetic render hints carried by the entities
    pub ball_skin: BallSkin,
    pub paddle_skin: PaddleSkin,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            seed: 0,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_BASE_SPEED,
            win_score: WIN_SCORE,
            booster_chance: BOOSTER_SPAWN_ONE_IN,
            booster_expiry_ticks: None,
            ball_skin: BallSkin::Classic,
            paddle_skin: PaddleSkin::Classic,
        }
    }
}

impl MatchConfig {
    /// Default setup for a mode
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Smallest field that fits the tallest paddle and a non-empty booster zone
    pub fn min_field() -> (f32, f32) {
        let min_width = 2.0 * BOOSTER_INSET_X + 2.0 * BOOSTER_RADIUS;
        let min_height = (2.0 * BOOSTER_INSET_Y + 2.0 * BOOSTER_RADIUS).max(PADDLE_MAX_HEIGHT);
        (min_width, min_height)
    }

    /// Reject anything that would put NaN or out-of-range values into the sim
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_speed", self.ball_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let (min_width, min_height) = Self::min_field();
        if self.field_width < min_width || self.field_height < min_height {
            return Err(ConfigError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
                min_width,
                min_height,
            });
        }

        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        if self.booster_chance == 0 {
            return Err(ConfigError::ZeroBoosterChance);
        }
        Ok(())
    }
}
