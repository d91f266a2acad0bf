//! Campaign progress carried across level attempts.

use dominion_core::LevelId;
use serde::{Deserialize, Serialize};

/// Coins credited for every completed level.
pub const VICTORY_COIN_REWARD: u32 = 50;

/// Durable per-player campaign state.
///
/// The engine folds terminal events into this record; persistence adapters
/// serialize it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignProgress {
    current_level: LevelId,
    coins: u32,
    games_won: u32,
    regions_captured: u32,
}

impl Default for CampaignProgress {
    fn default() -> Self {
        Self {
            current_level: LevelId::new(1),
            coins: 0,
            games_won: 0,
            regions_captured: 0,
        }
    }
}

impl CampaignProgress {
    /// Level the player should attempt next.
    #[must_use]
    pub const fn current_level(&self) -> LevelId {
        self.current_level
    }

    /// Coins earned across the campaign.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Number of levels completed victoriously.
    #[must_use]
    pub const fn games_won(&self) -> u32 {
        self.games_won
    }

    /// Total regions the player has captured across all attempts.
    #[must_use]
    pub const fn regions_captured(&self) -> u32 {
        self.regions_captured
    }

    /// Records a captured region.
    pub fn record_capture(&mut self) {
        self.regions_captured = self.regions_captured.saturating_add(1);
    }

    /// Records a completed level, crediting coins and unlocking the next one.
    pub fn record_victory(&mut self, completed: LevelId) {
        self.games_won = self.games_won.saturating_add(1);
        self.coins = self.coins.saturating_add(VICTORY_COIN_REWARD);
        if completed >= self.current_level {
            self.current_level = LevelId::new(completed.get().saturating_add(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victory_credits_coins_and_unlocks_the_next_level() {
        let mut progress = CampaignProgress::default();
        progress.record_victory(LevelId::new(1));
        assert_eq!(progress.coins(), VICTORY_COIN_REWARD);
        assert_eq!(progress.games_won(), 1);
        assert_eq!(progress.current_level(), LevelId::new(2));
    }

    #[test]
    fn replaying_an_old_level_does_not_regress_the_unlock() {
        let mut progress = CampaignProgress::default();
        progress.record_victory(LevelId::new(1));
        progress.record_victory(LevelId::new(2));
        progress.record_victory(LevelId::new(1));
        assert_eq!(progress.current_level(), LevelId::new(3));
        assert_eq!(progress.coins(), 3 * VICTORY_COIN_REWARD);
    }

    #[test]
    fn captures_accumulate() {
        let mut progress = CampaignProgress::default();
        progress.record_capture();
        progress.record_capture();
        assert_eq!(progress.regions_captured(), 2);
    }
}
