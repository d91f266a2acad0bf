#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic opponent that issues attack orders on a fixed cadence.
//!
//! The strategist is a pure system: it consumes the world's event stream and
//! an immutable region view, accumulates simulated time, and answers with
//! send-troops commands. It never touches world state directly, so its orders
//! go through the same validation as player input.

use std::time::Duration;

use dominion_core::{Command, Event, Faction, RegionId, RegionSnapshot, RegionView};
use log::debug;

/// Minimum garrison a region needs before the strategist attacks from it.
pub const MIN_ATTACK_FORCE: u32 = 5;

/// Troop advantage required before attacking a player-owned region.
pub const SAFETY_MARGIN: u32 = 2;

/// Configuration parameters required to construct the strategist.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    attack_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided attack cadence.
    #[must_use]
    pub const fn new(attack_interval: Duration) -> Self {
        Self { attack_interval }
    }
}

/// Pure system that emits one attack order per elapsed attack interval.
#[derive(Debug)]
pub struct AiStrategist {
    attack_interval: Duration,
    accumulator: Duration,
}

impl AiStrategist {
    /// Creates a new strategist using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            attack_interval: config.attack_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes events and the current region view to emit attack commands.
    pub fn handle(&mut self, events: &[Event], regions: &RegionView, out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                Event::LevelLoaded { .. } => {
                    self.accumulator = Duration::ZERO;
                    accumulated = Duration::ZERO;
                }
                _ => {}
            }
        }

        if self.attack_interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);

        // Commands dispatched this call drain their source garrison, so keep
        // a working copy the later firings of the same batch can observe.
        let mut working: Vec<RegionSnapshot> = regions.iter().copied().collect();

        while self.accumulator >= self.attack_interval {
            self.accumulator -= self.attack_interval;
            let Some((source, destination, count)) = decide(&working) else {
                continue;
            };
            debug!("attacking {destination} from {source} with {count} troops");
            out.push(Command::SendTroops {
                source,
                destination,
                count,
                issuer: Faction::Cpu,
            });
            if let Some(snapshot) = working.iter_mut().find(|snapshot| snapshot.id == source) {
                snapshot.troops = 0;
            }
        }
    }
}

/// Picks the next attack: strongest viable garrison against the nearest
/// neutral region, falling back to the weakest player region when the map
/// holds no neutrals and the garrison has a clear advantage.
///
/// Ties resolve toward the lowest region id. The full garrison is committed.
fn decide(regions: &[RegionSnapshot]) -> Option<(RegionId, RegionId, u32)> {
    let source = strongest_garrison(regions)?;
    let destination = nearest_neutral(regions, source)
        .or_else(|| weakest_player_region(regions, source))?;
    Some((source.id, destination.id, source.troops))
}

fn strongest_garrison(regions: &[RegionSnapshot]) -> Option<&RegionSnapshot> {
    let mut best: Option<&RegionSnapshot> = None;
    for snapshot in regions {
        if snapshot.owner != Faction::Cpu || snapshot.troops < MIN_ATTACK_FORCE {
            continue;
        }
        match best {
            Some(current) if snapshot.troops <= current.troops => {}
            _ => best = Some(snapshot),
        }
    }
    best
}

fn nearest_neutral<'a>(
    regions: &'a [RegionSnapshot],
    source: &RegionSnapshot,
) -> Option<&'a RegionSnapshot> {
    let mut best: Option<(&RegionSnapshot, f32)> = None;
    for snapshot in regions {
        if !snapshot.owner.is_neutral() {
            continue;
        }
        let distance = source.position.distance_squared(snapshot.position);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((snapshot, distance)),
        }
    }
    best.map(|(snapshot, _)| snapshot)
}

fn weakest_player_region<'a>(
    regions: &'a [RegionSnapshot],
    source: &RegionSnapshot,
) -> Option<&'a RegionSnapshot> {
    let mut best: Option<&RegionSnapshot> = None;
    for snapshot in regions {
        if snapshot.owner != Faction::Player {
            continue;
        }
        match best {
            Some(current) if snapshot.troops >= current.troops => {}
            _ => best = Some(snapshot),
        }
    }
    let target = best?;
    if source.troops > target.troops.saturating_add(SAFETY_MARGIN) {
        Some(target)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dominion_core::{Position, RegionShape};

    fn region(id: u32, owner: Faction, troops: u32, x: f32, y: f32) -> RegionSnapshot {
        RegionSnapshot {
            id: RegionId::new(id),
            position: Position::new(x, y),
            size: 100.0,
            shape: RegionShape::Vector1,
            owner,
            troops,
        }
    }

    #[test]
    fn attacks_the_nearest_neutral_with_the_full_garrison() {
        let regions = [
            region(0, Faction::Cpu, 8, 0.0, 0.0),
            region(1, Faction::Neutral, 3, 10.0, 0.0),
            region(2, Faction::Neutral, 0, 100.0, 0.0),
        ];
        assert_eq!(
            decide(&regions),
            Some((RegionId::new(0), RegionId::new(1), 8))
        );
    }

    #[test]
    fn holds_below_the_minimum_attack_force() {
        let regions = [
            region(0, Faction::Cpu, 4, 0.0, 0.0),
            region(1, Faction::Neutral, 0, 10.0, 0.0),
        ];
        assert_eq!(decide(&regions), None);
    }

    #[test]
    fn prefers_the_strongest_garrison_and_breaks_ties_low() {
        let regions = [
            region(0, Faction::Cpu, 9, 0.0, 0.0),
            region(1, Faction::Cpu, 9, 50.0, 0.0),
            region(2, Faction::Cpu, 12, 80.0, 0.0),
            region(3, Faction::Neutral, 0, 81.0, 0.0),
        ];
        assert_eq!(
            decide(&regions),
            Some((RegionId::new(2), RegionId::new(3), 12))
        );

        let tied = [
            region(0, Faction::Cpu, 9, 0.0, 0.0),
            region(1, Faction::Cpu, 9, 50.0, 0.0),
            region(2, Faction::Neutral, 0, 49.0, 0.0),
        ];
        assert_eq!(
            decide(&tied),
            Some((RegionId::new(0), RegionId::new(2), 9))
        );
    }

    #[test]
    fn falls_back_to_the_weakest_player_region_with_a_margin() {
        let regions = [
            region(0, Faction::Cpu, 8, 0.0, 0.0),
            region(1, Faction::Player, 5, 10.0, 0.0),
            region(2, Faction::Player, 3, 20.0, 0.0),
        ];
        assert_eq!(
            decide(&regions),
            Some((RegionId::new(0), RegionId::new(2), 8))
        );
    }

    #[test]
    fn declines_player_targets_without_a_clear_advantage() {
        let regions = [
            region(0, Faction::Cpu, 5, 0.0, 0.0),
            region(1, Faction::Player, 3, 10.0, 0.0),
        ];
        assert_eq!(decide(&regions), None);
    }
}
