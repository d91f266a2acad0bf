#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the Dominion territory game.
//!
//! The world owns the region store and the transfer ledger and is the only
//! place where either mutates. All mutation flows through [`apply`]: adapters
//! and systems submit [`Command`] values, the world validates and executes
//! them, and every observable consequence is broadcast as an [`Event`].
//! Everything else in this crate is read-only queries over the current state.

pub mod combat;
pub mod levels;
pub mod outcome;

use std::{collections::BTreeMap, time::Duration};

use dominion_core::{
    Command, Event, Faction, LevelId, Position, RegionId, RegionShape, TransferError, TransferId,
    CONTROL_EPSILON,
};
use levels::LevelConfiguration;
use log::{debug, info};

/// Simulated time a troop transfer spends in flight before arrival.
pub const TRANSFER_TRAVEL_TIME: Duration = Duration::from_secs(2);

/// Simulated time that must accrue before troop generation credits a batch.
pub const TROOP_GENERATION_QUANTUM: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
struct Region {
    position: Position,
    size: f32,
    shape: RegionShape,
    owner: Faction,
    troops: u32,
}

#[derive(Clone, Debug)]
struct Transfer {
    source: RegionId,
    destination: RegionId,
    count: u32,
    owner: Faction,
    elapsed: Duration,
}

/// Authoritative game state mutated exclusively through [`apply`].
#[derive(Clone, Debug)]
pub struct World {
    level: LevelId,
    regions: BTreeMap<RegionId, Region>,
    transfers: BTreeMap<TransferId, Transfer>,
    next_transfer: u64,
    generation_carry: Duration,
    paused: bool,
    victory: bool,
    defeat: bool,
    control: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            level: LevelId::new(0),
            regions: BTreeMap::new(),
            transfers: BTreeMap::new(),
            next_transfer: 0,
            generation_carry: Duration::ZERO,
            paused: false,
            victory: false,
            defeat: false,
            control: 0.0,
        }
    }
}

impl World {
    /// Creates an empty world with no level loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire world contents with a level configuration.
    ///
    /// Regions receive ascending ids in descriptor order. Neutral regions
    /// always start with zero troops regardless of the descriptor. All
    /// pending transfers, the pause flag, and the terminal flags reset.
    pub fn load_configuration(
        &mut self,
        configuration: &LevelConfiguration,
        events: &mut Vec<Event>,
    ) {
        self.level = configuration.id();
        self.regions.clear();
        self.transfers.clear();
        self.next_transfer = 0;
        self.generation_carry = Duration::ZERO;
        self.paused = false;
        self.victory = false;
        self.defeat = false;

        for (index, descriptor) in configuration.regions().iter().enumerate() {
            let troops = if descriptor.owner().is_neutral() {
                0
            } else {
                descriptor.troops()
            };
            let previous = self.regions.insert(
                RegionId::new(index as u32),
                Region {
                    position: descriptor.position(),
                    size: descriptor.size(),
                    shape: descriptor.shape(),
                    owner: descriptor.owner(),
                    troops,
                },
            );
            debug_assert!(previous.is_none());
        }

        self.control = outcome::control_fraction(self.owners());
        info!(
            "loaded {} with {} regions",
            self.level,
            self.regions.len()
        );
        events.push(Event::LevelLoaded {
            level: self.level,
            region_count: self.regions.len(),
        });
    }

    fn set_paused(&mut self, paused: bool, events: &mut Vec<Event>) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        events.push(Event::PauseChanged { paused });
    }

    fn send_troops(
        &mut self,
        source: RegionId,
        destination: RegionId,
        count: u32,
        issuer: Faction,
        events: &mut Vec<Event>,
    ) {
        let owner = match self.validate_transfer(source, destination, count, issuer) {
            Ok(owner) => owner,
            Err(reason) => {
                debug!("rejected transfer {source} -> {destination}: {reason}");
                events.push(Event::TransferRejected {
                    source,
                    destination,
                    count,
                    reason,
                });
                return;
            }
        };

        let Some(region) = self.regions.get_mut(&source) else {
            return;
        };
        region.troops -= count;

        let transfer = TransferId::new(self.next_transfer);
        self.next_transfer += 1;
        let previous = self.transfers.insert(
            transfer,
            Transfer {
                source,
                destination,
                count,
                owner,
                elapsed: Duration::ZERO,
            },
        );
        debug_assert!(previous.is_none());

        events.push(Event::TransferDispatched {
            transfer,
            source,
            destination,
            count,
            owner,
        });
    }

    fn validate_transfer(
        &self,
        source: RegionId,
        destination: RegionId,
        count: u32,
        issuer: Faction,
    ) -> Result<Faction, TransferError> {
        let region = self
            .regions
            .get(&source)
            .ok_or(TransferError::UnknownRegion(source))?;
        if !self.regions.contains_key(&destination) {
            return Err(TransferError::UnknownRegion(destination));
        }
        if source == destination {
            return Err(TransferError::SelfTransfer);
        }
        if count == 0 {
            return Err(TransferError::NonPositiveCount);
        }
        if region.owner != issuer {
            return Err(TransferError::NotIssuerOwned {
                issuer,
                owner: region.owner,
            });
        }
        if region.troops < count {
            return Err(TransferError::InsufficientTroops {
                requested: count,
                available: region.troops,
            });
        }
        Ok(region.owner)
    }

    fn tick(&mut self, dt: Duration, events: &mut Vec<Event>) {
        if self.paused || dt.is_zero() {
            return;
        }

        events.push(Event::TimeAdvanced { dt });
        self.generate_troops(dt, events);
        self.advance_transfers(dt, events);
        self.refresh_control(events);
        self.refresh_outcome(events);
    }

    fn generate_troops(&mut self, dt: Duration, events: &mut Vec<Event>) {
        self.generation_carry += dt;
        let quanta = self.generation_carry.as_secs() / TROOP_GENERATION_QUANTUM.as_secs();
        if quanta == 0 {
            return;
        }
        self.generation_carry -= TROOP_GENERATION_QUANTUM * quanta as u32;

        let added = quanta as u32;
        for (&id, region) in &mut self.regions {
            if region.owner.is_neutral() {
                continue;
            }
            region.troops = region.troops.saturating_add(added);
            events.push(Event::TroopsGenerated {
                region: id,
                added,
                total: region.troops,
            });
        }
    }

    fn advance_transfers(&mut self, dt: Duration, events: &mut Vec<Event>) {
        let mut arrived = Vec::new();
        for (&id, transfer) in &mut self.transfers {
            transfer.elapsed += dt;
            if transfer.elapsed >= TRANSFER_TRAVEL_TIME {
                arrived.push(id);
            }
        }

        // Ascending-id order keeps simultaneous arrivals deterministic.
        for id in arrived {
            let Some(transfer) = self.transfers.remove(&id) else {
                continue;
            };
            self.resolve_arrival(id, &transfer, events);
        }
    }

    fn resolve_arrival(&mut self, id: TransferId, transfer: &Transfer, events: &mut Vec<Event>) {
        // Regions are never removed while a level runs.
        let Some(region) = self.regions.get_mut(&transfer.destination) else {
            return;
        };

        match combat::resolve(transfer.owner, transfer.count, region.owner, region.troops) {
            combat::Resolution::Reinforced { total } => {
                region.troops = total;
                events.push(Event::RegionReinforced {
                    region: transfer.destination,
                    added: transfer.count,
                    total,
                });
            }
            combat::Resolution::Captured { remaining } => {
                let previous_owner = region.owner;
                region.owner = transfer.owner;
                region.troops = remaining;
                info!(
                    "{} captured {} from {previous_owner} ({remaining} troops remain)",
                    transfer.owner, transfer.destination
                );
                events.push(Event::RegionCaptured {
                    region: transfer.destination,
                    previous_owner,
                    new_owner: transfer.owner,
                    remaining,
                });
            }
            combat::Resolution::Defended { remaining } => {
                region.troops = remaining;
                events.push(Event::RegionDefended {
                    region: transfer.destination,
                    attacker: transfer.owner,
                    remaining,
                });
            }
        }
        debug!("transfer {id} resolved at {}", transfer.destination);
    }

    fn refresh_control(&mut self, events: &mut Vec<Event>) {
        let fraction = outcome::control_fraction(self.owners());
        if (fraction - self.control).abs() > CONTROL_EPSILON {
            events.push(Event::ControlShifted { fraction });
        }
        self.control = fraction;
    }

    fn refresh_outcome(&mut self, events: &mut Vec<Event>) {
        let outcome = outcome::evaluate(self.owners());
        if outcome.victory && !self.victory {
            info!("victory achieved on {}", self.level);
            events.push(Event::VictoryAchieved);
        }
        if outcome.defeat && !self.defeat {
            info!("defeat suffered on {}", self.level);
            events.push(Event::DefeatSuffered);
        }
        self.victory = outcome.victory;
        self.defeat = outcome.defeat;
    }

    fn owners(&self) -> impl Iterator<Item = Faction> + '_ {
        self.regions.values().map(|region| region.owner)
    }
}

/// Applies one command to the world, appending resulting events.
///
/// This is the single entry point through which world state changes.
pub fn apply(world: &mut World, command: Command, events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level } => {
            let configuration = levels::configuration(level);
            world.load_configuration(&configuration, events);
        }
        Command::Tick { dt } => world.tick(dt, events),
        Command::SendTroops {
            source,
            destination,
            count,
            issuer,
        } => world.send_troops(source, destination, count, issuer, events),
        Command::SetPaused { paused } => world.set_paused(paused, events),
    }
}

/// Read-only queries over the current world state.
pub mod query {
    use dominion_core::{
        Faction, GameSnapshot, LevelId, RegionId, RegionSnapshot, RegionView, TransferSnapshot,
        TransferView,
    };

    use crate::{World, TRANSFER_TRAVEL_TIME};

    /// Identifier of the currently loaded level.
    #[must_use]
    pub fn level(world: &World) -> LevelId {
        world.level
    }

    /// Whether the simulation is paused.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Whether every region on a non-empty map is player-owned.
    #[must_use]
    pub fn is_victory(world: &World) -> bool {
        world.victory
    }

    /// Whether the player owns no region.
    #[must_use]
    pub fn is_defeat(world: &World) -> bool {
        world.defeat
    }

    /// Fraction of all regions owned by the player, in 0.0..=1.0.
    #[must_use]
    pub fn control_percentage(world: &World) -> f32 {
        world.control
    }

    /// Current owner of a region, if it exists.
    #[must_use]
    pub fn region_owner(world: &World, id: RegionId) -> Option<Faction> {
        world.regions.get(&id).map(|region| region.owner)
    }

    /// Snapshot of a single region, if it exists.
    #[must_use]
    pub fn region(world: &World, id: RegionId) -> Option<RegionSnapshot> {
        world.regions.get(&id).map(|region| RegionSnapshot {
            id,
            position: region.position,
            size: region.size,
            shape: region.shape,
            owner: region.owner,
            troops: region.troops,
        })
    }

    /// Snapshot of every region in ascending-id order.
    #[must_use]
    pub fn region_view(world: &World) -> RegionView {
        let snapshots = world
            .regions
            .keys()
            .filter_map(|&id| region(world, id))
            .collect();
        RegionView::from_snapshots(snapshots)
    }

    /// Snapshot of every pending transfer in ascending-id order.
    #[must_use]
    pub fn transfer_view(world: &World) -> TransferView {
        let snapshots = world
            .transfers
            .iter()
            .map(|(&id, transfer)| TransferSnapshot {
                id,
                source: transfer.source,
                destination: transfer.destination,
                count: transfer.count,
                owner: transfer.owner,
                progress: (transfer.elapsed.as_secs_f32() / TRANSFER_TRAVEL_TIME.as_secs_f32())
                    .min(1.0),
            })
            .collect();
        TransferView::from_snapshots(snapshots)
    }

    /// Aggregate snapshot published to presentation layers.
    #[must_use]
    pub fn game_snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            level: world.level,
            paused: world.paused,
            victory: world.victory,
            defeat: world.defeat,
            control: world.control,
            regions: region_view(world).into_vec(),
            transfers: transfer_view(world).into_vec(),
        }
    }
}
