//! Pure combat resolution for arriving troop transfers.

use dominion_core::Faction;

/// Result of resolving an arriving force against a target garrison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The arriving force joined a friendly garrison.
    Reinforced {
        /// Garrison strength after the reinforcement.
        total: u32,
    },
    /// The arriving force overwhelmed the garrison and takes ownership.
    Captured {
        /// Attacker troops surviving the battle.
        remaining: u32,
    },
    /// The garrison held; the arriving force is destroyed.
    Defended {
        /// Defender troops surviving the battle.
        remaining: u32,
    },
}

/// Resolves an arriving force of `attacking` troops owned by `attacker`
/// against a garrison of `defending` troops owned by `defender`.
///
/// Matching factions reinforce. An attacker captures only with strictly more
/// troops than the garrison; an exact tie leaves the defender in place with
/// zero troops, so no region ever flips on a tie.
#[must_use]
pub fn resolve(attacker: Faction, attacking: u32, defender: Faction, defending: u32) -> Resolution {
    if attacker == defender {
        return Resolution::Reinforced {
            total: defending.saturating_add(attacking),
        };
    }

    if attacking > defending {
        Resolution::Captured {
            remaining: attacking - defending,
        }
    } else {
        Resolution::Defended {
            remaining: defending - attacking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_factions_reinforce() {
        assert_eq!(
            resolve(Faction::Player, 4, Faction::Player, 7),
            Resolution::Reinforced { total: 11 }
        );
    }

    #[test]
    fn stronger_attacker_captures_with_remainder() {
        assert_eq!(
            resolve(Faction::Player, 10, Faction::Cpu, 4),
            Resolution::Captured { remaining: 6 }
        );
    }

    #[test]
    fn weaker_attacker_is_destroyed() {
        assert_eq!(
            resolve(Faction::Cpu, 3, Faction::Player, 9),
            Resolution::Defended { remaining: 6 }
        );
    }

    #[test]
    fn exact_tie_favors_the_defender() {
        assert_eq!(
            resolve(Faction::Player, 5, Faction::Neutral, 5),
            Resolution::Defended { remaining: 0 }
        );
    }

    #[test]
    fn lone_attacker_takes_an_empty_region() {
        assert_eq!(
            resolve(Faction::Cpu, 1, Faction::Neutral, 0),
            Resolution::Captured { remaining: 1 }
        );
    }

    #[test]
    fn resolution_is_total_for_any_pairing() {
        for attacking in 1..20u32 {
            for defending in 0..20u32 {
                let resolution = resolve(Faction::Player, attacking, Faction::Cpu, defending);
                match resolution {
                    Resolution::Captured { .. } => assert!(attacking > defending),
                    Resolution::Defended { .. } => assert!(attacking <= defending),
                    Resolution::Reinforced { .. } => panic!("factions differ"),
                }
            }
        }
    }
}
