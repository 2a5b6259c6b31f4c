//! Player progress: coins, owned cosmetics and best scores
//!
//! Fed by the [`ProgressDelta`]s a tick produces. A failing sink is logged
//! and skipped; it never reaches back into the simulation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{self, SaveFile};
use crate::sim::{GameMode, ProgressDelta};
use crate::skins::{BallSkin, Cosmetic, Environment, PaddleSkin};

/// Persistent player progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub coins: u32,
    pub ball_skins: BTreeSet<BallSkin>,
    pub paddle_skins: BTreeSet<PaddleSkin>,
    pub environments: BTreeSet<Environment>,
    /// Best left-paddle score reached per mode
    pub best_scores: BTreeMap<GameMode, u32>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            coins: 0,
            ball_skins: free_set(),
            paddle_skins: free_set(),
            environments: free_set(),
            best_scores: BTreeMap::new(),
        }
    }
}

fn free_set<C: Cosmetic>() -> BTreeSet<C> {
    C::ALL.iter().copied().filter(|c| c.is_free()).collect()
}

impl SaveFile for Progress {
    const KIND: &'static str = "progress";
    const VERSION: u32 = 1;
}

/// A cosmetic whose ownership is tracked in [`Progress`]
pub trait Unlockable: Cosmetic {
    fn owned(progress: &Progress) -> &BTreeSet<Self>;
    fn owned_mut(progress: &mut Progress) -> &mut BTreeSet<Self>;
}

impl Unlockable for BallSkin {
    fn owned(progress: &Progress) -> &BTreeSet<Self> {
        &progress.ball_skins
    }
    fn owned_mut(progress: &mut Progress) -> &mut BTreeSet<Self> {
        &mut progress.ball_skins
    }
}

impl Unlockable for PaddleSkin {
    fn owned(progress: &Progress) -> &BTreeSet<Self> {
        &progress.paddle_skins
    }
    fn owned_mut(progress: &mut Progress) -> &mut BTreeSet<Self> {
        &mut progress.paddle_skins
    }
}

impl Unlockable for Environment {
    fn owned(progress: &Progress) -> &BTreeSet<Self> {
        &progress.environments
    }
    fn owned_mut(progress: &mut Progress) -> &mut BTreeSet<Self> {
        &mut progress.environments
    }
}

/// Result of a shop click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    /// Already owned; nothing charged
    Owned,
    /// Bought for `cost` coins
    Bought { cost: u32 },
    /// Not enough coins; nothing changed
    TooExpensive { cost: u32 },
    /// Not sold in the shop
    NotForSale,
}

impl Progress {
    pub fn is_unlocked<C: Unlockable>(&self, item: C) -> bool {
        item.is_free() || C::owned(self).contains(&item)
    }

    /// Buy `item` if affordable
    pub fn purchase<C: Unlockable>(&mut self, item: C) -> Purchase {
        if self.is_unlocked(item) {
            return Purchase::Owned;
        }
        let Some(cost) = item.info().cost else {
            return Purchase::NotForSale;
        };
        if self.coins < cost {
            return Purchase::TooExpensive { cost };
        }
        self.coins -= cost;
        C::owned_mut(self).insert(item);
        log::info!("Unlocked {} for {cost} coins", item.info().name);
        Purchase::Bought { cost }
    }

    /// Remember `score` if it beats the best for `mode`
    pub fn record_score(&mut self, mode: GameMode, score: u32) -> bool {
        let best = self.best_scores.entry(mode).or_insert(0);
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }

    pub fn best_score(&self, mode: GameMode) -> Option<u32> {
        self.best_scores.get(&mode).copied()
    }

    /// End-of-round coin summary shown to the player
    ///
    /// Display value only; the coins were already credited through deltas.
    pub fn round_bonus(left_score: u32, win_score: u32) -> u32 {
        if left_score >= win_score {
            left_score.saturating_mul(5)
        } else {
            left_score.saturating_mul(2)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        persistence::load_json(path)
    }

    pub fn load_or_default(path: &Path) -> Self {
        persistence::load_or_default(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)
    }
}

/// Receiver of progress deltas
pub trait ProgressSink {
    fn record(&mut self, delta: &ProgressDelta) -> Result<(), PersistenceError>;
}

impl ProgressSink for Progress {
    fn record(&mut self, delta: &ProgressDelta) -> Result<(), PersistenceError> {
        if let ProgressDelta::CoinsEarned(amount) = delta {
            self.coins = self.coins.saturating_add(*amount);
        }
        Ok(())
    }
}

/// Progress bound to the file it was loaded from
pub struct ProgressFile {
    pub progress: Progress,
    path: PathBuf,
}

impl ProgressFile {
    /// Load `path` (or start fresh); call [`ProgressFile::save`] to write back
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let progress = Progress::load_or_default(&path);
        Self { progress, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        self.progress.save_to(&self.path)
    }
}

impl ProgressSink for ProgressFile {
    fn record(&mut self, delta: &ProgressDelta) -> Result<(), PersistenceError> {
        self.progress.record(delta)
    }
}

/// Forward `deltas` to `sink`, logging and skipping failures
///
/// Returns the number of deltas the sink rejected.
pub fn apply_deltas<S: ProgressSink + ?Sized>(sink: &mut S, deltas: &[ProgressDelta]) -> usize {
    let mut failed = 0;
    for delta in deltas {
        if let Err(err) = sink.record(delta) {
            log::warn!("Progress update {delta:?} dropped: {err}");
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_util::temp_dir;

    struct BrokenSink;

    impl ProgressSink for BrokenSink {
        fn record(&mut self, _delta: &ProgressDelta) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_defaults_own_free_items() {
        let progress = Progress::default();
        assert!(progress.is_unlocked(BallSkin::Classic));
        assert!(progress.is_unlocked(PaddleSkin::Classic));
        assert!(progress.is_unlocked(Environment::NeonArena));
        assert!(!progress.is_unlocked(BallSkin::Fire));
        assert_eq!(progress.coins, 0);
    }

    #[test]
    fn test_purchase() {
        let mut progress = Progress::default();
        let cost = BallSkin::Neon.info().cost.unwrap();
        assert_eq!(progress.purchase(BallSkin::Neon), Purchase::TooExpensive { cost });

        progress.coins = cost + 10;
        assert_eq!(progress.purchase(BallSkin::Neon), Purchase::Bought { cost });
        assert_eq!(progress.coins, 10);
        assert!(progress.is_unlocked(BallSkin::Neon));
        assert_eq!(progress.purchase(BallSkin::Neon), Purchase::Owned);
        assert_eq!(progress.coins, 10);
    }

    #[test]
    fn test_environments_are_not_for_sale() {
        let mut progress = Progress {
            coins: u32::MAX,
            ..Progress::default()
        };
        assert_eq!(progress.purchase(Environment::FirePit), Purchase::NotForSale);
        assert_eq!(progress.coins, u32::MAX);
        assert!(!progress.is_unlocked(Environment::FirePit));
    }

    #[test]
    fn test_deltas_credit_coins() {
        let mut progress = Progress::default();
        let failed = apply_deltas(
            &mut progress,
            &[
                ProgressDelta::CoinsEarned(3),
                ProgressDelta::ScoreChanged { left: 1, right: 0 },
                ProgressDelta::CoinsEarned(50),
            ],
        );
        assert_eq!(failed, 0);
        assert_eq!(progress.coins, 53);
    }

    #[test]
    fn test_failing_sink_is_swallowed() {
        let deltas = [ProgressDelta::CoinsEarned(1), ProgressDelta::CoinsEarned(2)];
        assert_eq!(apply_deltas(&mut BrokenSink, &deltas), 2);
    }

    #[test]
    fn test_best_scores() {
        let mut progress = Progress::default();
        assert_eq!(progress.best_score(GameMode::Endless), None);
        assert!(progress.record_score(GameMode::Endless, 12));
        assert!(!progress.record_score(GameMode::Endless, 8));
        assert_eq!(progress.best_score(GameMode::Endless), Some(12));
    }

    #[test]
    fn test_round_bonus() {
        assert_eq!(Progress::round_bonus(10, 10), 50);
        assert_eq!(Progress::round_bonus(7, 10), 14);
        assert_eq!(Progress::round_bonus(0, 10), 0);
    }

    #[test]
    fn test_progress_file_saves_coins() {
        let path = temp_dir("progress_file").join("progress.json");
        let mut file = ProgressFile::open(&path);
        assert_eq!(file.progress, Progress::default());

        apply_deltas(&mut file, &[ProgressDelta::CoinsEarned(140)]);
        assert_eq!(
            file.progress.purchase(PaddleSkin::Neon),
            Purchase::Bought { cost: 100 }
        );
        file.save().unwrap();

        let reloaded = Progress::load_from(&path).unwrap();
        assert_eq!(reloaded, file.progress);
    }
}
