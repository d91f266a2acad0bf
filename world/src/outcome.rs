//! Pure win/loss predicates and territory-control metrics.

use dominion_core::Faction;

/// Terminal flags computed over the current region ownership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Every region on a non-empty map is player-owned.
    pub victory: bool,
    /// The player owns no region.
    pub defeat: bool,
}

/// Evaluates the win/loss predicates over the provided region owners.
///
/// Victory requires a non-empty region set, so an empty map reads as a
/// defeat only.
#[must_use]
pub fn evaluate(owners: impl Iterator<Item = Faction>) -> Outcome {
    let (total, player) = count(owners);
    Outcome {
        victory: total > 0 && player == total,
        defeat: player == 0,
    }
}

/// Fraction of all regions owned by the player; 0.0 for an empty map.
#[must_use]
pub fn control_fraction(owners: impl Iterator<Item = Faction>) -> f32 {
    let (total, player) = count(owners);
    if total == 0 {
        0.0
    } else {
        player as f32 / total as f32
    }
}

fn count(owners: impl Iterator<Item = Faction>) -> (usize, usize) {
    let mut total = 0;
    let mut player = 0;
    for owner in owners {
        total += 1;
        if owner == Faction::Player {
            player += 1;
        }
    }
    (total, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_player_ownership_is_victory() {
        let outcome = evaluate([Faction::Player, Faction::Player].into_iter());
        assert!(outcome.victory);
        assert!(!outcome.defeat);
    }

    #[test]
    fn any_foreign_region_blocks_victory() {
        let outcome = evaluate([Faction::Player, Faction::Neutral].into_iter());
        assert!(!outcome.victory);
        assert!(!outcome.defeat);
    }

    #[test]
    fn no_player_region_is_defeat() {
        let outcome = evaluate([Faction::Cpu, Faction::Neutral].into_iter());
        assert!(!outcome.victory);
        assert!(outcome.defeat);
    }

    #[test]
    fn empty_map_is_a_degenerate_defeat() {
        let outcome = evaluate(std::iter::empty());
        assert!(!outcome.victory);
        assert!(outcome.defeat);
    }

    #[test]
    fn control_fraction_counts_player_share() {
        let owners = [
            Faction::Player,
            Faction::Cpu,
            Faction::Neutral,
            Faction::Player,
        ];
        assert_eq!(control_fraction(owners.into_iter()), 0.5);
    }

    #[test]
    fn control_fraction_of_empty_map_is_zero() {
        assert_eq!(control_fraction(std::iter::empty()), 0.0);
    }
}
