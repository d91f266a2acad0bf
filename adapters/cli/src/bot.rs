//! Seeded stand-in for player input during headless runs.

use std::time::Duration;

use dominion_core::{Faction, RegionId, RegionSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DECISION_INTERVAL: Duration = Duration::from_secs(1);
const MIN_SOURCE_TROOPS: u32 = 2;

/// Deterministic player surrogate that commits half a garrison at a time.
pub(crate) struct PlayerBot {
    rng: ChaCha8Rng,
    accumulator: Duration,
}

impl PlayerBot {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            accumulator: Duration::ZERO,
        }
    }

    /// Accrues simulated time and, once per decision interval, picks a
    /// random expansion order from the current region snapshots.
    pub(crate) fn decide(
        &mut self,
        dt: Duration,
        regions: &[RegionSnapshot],
    ) -> Option<(RegionId, RegionId, u32)> {
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.accumulator < DECISION_INTERVAL {
            return None;
        }
        self.accumulator -= DECISION_INTERVAL;

        let sources: Vec<&RegionSnapshot> = regions
            .iter()
            .filter(|region| {
                region.owner == Faction::Player && region.troops >= MIN_SOURCE_TROOPS
            })
            .collect();
        let targets: Vec<&RegionSnapshot> = regions
            .iter()
            .filter(|region| region.owner != Faction::Player)
            .collect();
        if sources.is_empty() || targets.is_empty() {
            return None;
        }

        let source = sources[self.rng.gen_range(0..sources.len())];
        let target = targets[self.rng.gen_range(0..targets.len())];
        let count = source.troops.div_ceil(2);
        Some((source.id, target.id, count))
    }
}
