//! Pong Ultimate headless driver
//!
//! Runs a seeded match with a scripted left paddle against the AI (or a
//! second scripted paddle in two-player mode), plays cues through the
//! logging audio sink and credits coins to the progress file.
//!
//! ```text
//! pong-ultimate [--mode classic] [--seed 42] [--config match.json]
//!               [--time-limit 120] [--data-dir .pong-ultimate]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use pong_ultimate::audio::{AudioManager, LogAudio};
    use pong_ultimate::consts::TICK_RATE;
    use pong_ultimate::progress::{self, Progress, ProgressFile};
    use pong_ultimate::sim::{
        GameMode, GamePhase, GameState, Paddle, PaddleIntent, Side, TickInput, tick,
    };
    use pong_ultimate::{ConfigError, MatchConfig, Settings};

    /// Dead zone of the scripted paddle (pixels)
    const SCRIPT_DEAD_ZONE: f32 = 10.0;
    /// Hard stop for modes that never end on their own
    const DEFAULT_TIME_LIMIT_SECS: u64 = 120;

    struct Args {
        config: MatchConfig,
        time_limit_ticks: u64,
        data_dir: PathBuf,
    }

    fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, ConfigError> {
        let mut config = MatchConfig::default();
        let mut mode = None;
        let mut seed = None;
        let mut time_limit = DEFAULT_TIME_LIMIT_SECS;
        let mut data_dir = PathBuf::from(".pong-ultimate");

        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| ConfigError::Parse(format!("{flag} needs a value")))
            };
            match flag.as_str() {
                "--mode" => mode = Some(value()?.parse::<GameMode>()?),
                "--seed" => {
                    let raw = value()?;
                    seed = Some(
                        raw.parse::<u64>()
                            .map_err(|e| ConfigError::Parse(format!("seed `{raw}`: {e}")))?,
                    );
                }
                "--config" => {
                    let path = value()?;
                    let json = std::fs::read_to_string(&path)
                        .map_err(|e| ConfigError::Parse(format!("{path}: {e}")))?;
                    config = MatchConfig::from_json(&json)?;
                }
                "--time-limit" => {
                    let raw = value()?;
                    time_limit = raw
                        .parse()
                        .map_err(|e| ConfigError::Parse(format!("time limit `{raw}`: {e}")))?;
                }
                "--data-dir" => data_dir = PathBuf::from(value()?),
                other => return Err(ConfigError::Parse(format!("unknown argument `{other}`"))),
            }
        }

        if let Some(mode) = mode {
            config.mode = mode;
        }
        if let Some(seed) = seed {
            config.seed = seed;
        }
        let time_limit_ticks = time_limit
            .checked_mul(u64::from(TICK_RATE))
            .ok_or_else(|| ConfigError::Parse(format!("time limit `{time_limit}` is too large")))?;
        Ok(Args {
            config,
            time_limit_ticks,
            data_dir,
        })
    }

    /// Chase the nearest ball heading toward `paddle`, else drift to center
    fn scripted_intent(state: &GameState, paddle: &Paddle) -> PaddleIntent {
        let incoming = state
            .balls
            .iter()
            .filter(|b| b.vel.x * paddle.side.away_sign() < 0.0)
            .min_by(|a, b| {
                (a.pos.x - paddle.x)
                    .abs()
                    .total_cmp(&(b.pos.x - paddle.x).abs())
            });
        let target = incoming.map_or(state.config.field_height / 2.0, |b| b.pos.y);

        PaddleIntent {
            up: target < paddle.y - SCRIPT_DEAD_ZONE,
            down: target > paddle.y + SCRIPT_DEAD_ZONE,
        }
    }

    pub fn run() -> ExitCode {
        let args = match parse_args(std::env::args().skip(1)) {
            Ok(args) => args,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        };

        let settings = Settings::load_or_default(&args.data_dir.join("settings.json"));
        let mut audio = AudioManager::with_settings(LogAudio, &settings);
        let mut store = ProgressFile::open(args.data_dir.join("progress.json"));
        let coins_before = store.progress.coins;

        let mut state = match GameState::new(args.config) {
            Ok(state) => state,
            Err(err) => {
                log::error!("Invalid match config: {err}");
                return ExitCode::FAILURE;
            }
        };
        log::info!(
            "Environment: {:?}, ball skin {:?}",
            settings.environment(),
            state.config.ball_skin
        );

        while state.phase == GamePhase::Playing {
            let input = TickInput {
                left: scripted_intent(&state, state.paddle(Side::Left)),
                right: scripted_intent(&state, state.paddle(Side::Right)),
                ..Default::default()
            };
            tick(&mut state, &input);

            audio.play_events(&state.events);
            progress::apply_deltas(&mut store, &state.deltas);

            if state.phase == GamePhase::Playing && state.time_ticks >= args.time_limit_ticks {
                log::info!("Time limit reached");
                if let Err(err) = state.end_round() {
                    log::warn!("{err}");
                    break;
                }
            }
        }

        let (left, right) = state.scores();
        let mode = state.config.mode;
        if store.progress.record_score(mode, left) {
            log::info!("New best score for {}: {left}", mode.as_str());
        }
        if let Err(err) = store.save() {
            log::warn!("Progress not saved to {}: {err}", store.path().display());
        }

        println!("Mode:     {}", mode.as_str());
        println!("Seed:     {}", state.config.seed);
        println!("Outcome:  {:?}", state.outcome);
        println!("Score:    {left} - {right}");
        println!(
            "Duration: {:.1}s ({} ticks)",
            state.time_ticks as f64 / f64::from(TICK_RATE),
            state.time_ticks
        );
        println!(
            "Coins:    +{} this match (round bonus {}), {} total",
            store.progress.coins.saturating_sub(coins_before),
            Progress::round_bonus(left, state.config.win_score),
            store.progress.coins
        );
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pong Ultimate (headless) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend; the library is the wasm entry point
}
