#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dominion simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Minimum per-transfer progress delta considered a material change.
pub const PROGRESS_EPSILON: f32 = 0.05;

/// Minimum control-percentage delta considered a material change.
pub const CONTROL_EPSILON: f32 = 0.01;

/// Ownership category assigned to every region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// The human-controlled faction.
    Player,
    /// The computer-controlled opponent.
    Cpu,
    /// Unowned territory that never generates troops.
    Neutral,
}

impl Faction {
    /// Reports whether the faction is the neutral non-combatant.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Cpu => write!(f, "cpu"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Unique identifier assigned to a region within one level instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(u32);

impl RegionId {
    /// Creates a new region identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region-{}", self.0)
    }
}

/// Unique identifier assigned to an in-flight troop transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransferId(u64);

impl TransferId {
    /// Creates a new transfer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transfer-{}", self.0)
    }
}

/// Identifier of a level definition consumed from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level-{}", self.0)
    }
}

/// Point in the design-space coordinate system used for region placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new design-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in design-space units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in design-space units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Squared Euclidean distance to another position.
    #[must_use]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Cosmetic outline variant assigned to a region.
///
/// The variant has no effect on simulation; presentation layers map it to an
/// asset when drawing the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionShape {
    /// First outline variant.
    Vector1,
    /// Second outline variant.
    Vector2,
    /// Third outline variant.
    Vector3,
    /// Fourth outline variant.
    Vector4,
    /// Fifth outline variant.
    Vector5,
    /// Sixth outline variant.
    Vector6,
    /// Seventh outline variant.
    Vector7,
    /// Eighth outline variant.
    Vector8,
    /// Ninth outline variant.
    Vector9,
    /// Tenth outline variant.
    Vector10,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the region store and transfer ledger with a level definition.
    LoadLevel {
        /// Identifier of the level definition to load.
        level: LevelId,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that troops depart from one region toward another.
    SendTroops {
        /// Region the troops depart from.
        source: RegionId,
        /// Region the troops will arrive at.
        destination: RegionId,
        /// Number of troops committed to the transfer.
        count: u32,
        /// Faction issuing the order; must own the source region.
        issuer: Faction,
    },
    /// Toggles the cooperative pause flag.
    SetPaused {
        /// Whether the simulation should hold all state mutation.
        paused: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a level definition replaced the world contents.
    LevelLoaded {
        /// Identifier of the level that was loaded.
        level: LevelId,
        /// Number of regions the level placed on the map.
        region_count: usize,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports troops credited to a region by time-based generation.
    TroopsGenerated {
        /// Region that received the troops.
        region: RegionId,
        /// Number of troops credited this tick.
        added: u32,
        /// Troop count of the region after the credit.
        total: u32,
    },
    /// Confirms that a troop transfer departed its source region.
    TransferDispatched {
        /// Identifier assigned to the transfer by the world.
        transfer: TransferId,
        /// Region the troops departed from.
        source: RegionId,
        /// Region the troops will arrive at.
        destination: RegionId,
        /// Number of troops in flight.
        count: u32,
        /// Faction that owned the source region at departure.
        owner: Faction,
    },
    /// Reports that a send-troops request was rejected without mutation.
    TransferRejected {
        /// Region named as the source in the rejected request.
        source: RegionId,
        /// Region named as the destination in the rejected request.
        destination: RegionId,
        /// Troop count named in the rejected request.
        count: u32,
        /// Specific reason the request failed validation.
        reason: TransferError,
    },
    /// Confirms that an arriving transfer reinforced a friendly region.
    RegionReinforced {
        /// Region that received the reinforcements.
        region: RegionId,
        /// Number of troops added.
        added: u32,
        /// Troop count of the region after the reinforcement.
        total: u32,
    },
    /// Confirms that an arriving transfer captured the target region.
    RegionCaptured {
        /// Region whose ownership flipped.
        region: RegionId,
        /// Faction that owned the region before the battle.
        previous_owner: Faction,
        /// Faction that owns the region after the battle.
        new_owner: Faction,
        /// Troops garrisoned in the region after the battle.
        remaining: u32,
    },
    /// Confirms that the defenders of the target region held.
    RegionDefended {
        /// Region that repelled the attack.
        region: RegionId,
        /// Faction whose attack was repelled.
        attacker: Faction,
        /// Troops remaining in the defending garrison.
        remaining: u32,
    },
    /// Reports a material change in the player's share of the map.
    ControlShifted {
        /// Fraction of all regions owned by the player, in 0.0..=1.0.
        fraction: f32,
    },
    /// Announces that the cooperative pause flag changed.
    PauseChanged {
        /// Whether the simulation is now paused.
        paused: bool,
    },
    /// Announces that every region is player-owned.
    VictoryAchieved,
    /// Announces that the player no longer owns any region.
    DefeatSuffered,
}

/// Reasons a send-troops request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum TransferError {
    /// The requested troop count was zero.
    #[error("troop count must be positive")]
    NonPositiveCount,
    /// The source region holds fewer troops than requested.
    #[error("requested {requested} troops but only {available} available")]
    InsufficientTroops {
        /// Troop count named in the request.
        requested: u32,
        /// Troops garrisoned in the source region.
        available: u32,
    },
    /// Source and destination name the same region.
    #[error("source and destination are the same region")]
    SelfTransfer,
    /// The named region does not exist in the current level.
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),
    /// The issuing faction does not own the source region.
    #[error("{issuer} cannot send troops from a region owned by {owner}")]
    NotIssuerOwned {
        /// Faction that issued the order.
        issuer: Faction,
        /// Faction that actually owns the source region.
        owner: Faction,
    },
}

/// Immutable representation of a single region's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    /// Unique identifier assigned to the region.
    pub id: RegionId,
    /// Center of the region in design-space coordinates.
    pub position: Position,
    /// Scalar extent used for rendering scale and hit testing.
    pub size: f32,
    /// Cosmetic outline variant.
    pub shape: RegionShape,
    /// Faction that currently owns the region.
    pub owner: Faction,
    /// Number of troops garrisoned in the region.
    pub troops: u32,
}

/// Read-only snapshot describing all regions on the map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionView {
    snapshots: Vec<RegionSnapshot>,
}

impl RegionView {
    /// Creates a new region view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<RegionSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending-id order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single region.
    #[must_use]
    pub fn get(&self, id: RegionId) -> Option<&RegionSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of regions captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<RegionSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single in-flight transfer used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferSnapshot {
    /// Unique identifier assigned to the transfer.
    pub id: TransferId,
    /// Region the troops departed from.
    pub source: RegionId,
    /// Region the troops will arrive at.
    pub destination: RegionId,
    /// Number of troops in flight.
    pub count: u32,
    /// Faction that owned the source region at departure.
    pub owner: Faction,
    /// Travel progress in 0.0..=1.0.
    pub progress: f32,
}

/// Read-only snapshot describing all pending transfers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferView {
    snapshots: Vec<TransferSnapshot>,
}

impl TransferView {
    /// Creates a new transfer view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TransferSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending-id order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pending transfers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no transfers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TransferSnapshot> {
        self.snapshots
    }
}

/// Aggregate state published to presentation layers once per changed tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Identifier of the level the snapshot describes.
    pub level: LevelId,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Whether every region is player-owned.
    pub victory: bool,
    /// Whether the player owns no region.
    pub defeat: bool,
    /// Fraction of all regions owned by the player, in 0.0..=1.0.
    pub control: f32,
    /// All regions in ascending-id order.
    pub regions: Vec<RegionSnapshot>,
    /// All pending transfers in ascending-id order.
    pub transfers: Vec<TransferSnapshot>,
}

impl GameSnapshot {
    /// Reports whether this snapshot differs materially from a previous one.
    ///
    /// Troop counts, ownership, the set of pending transfers, and flag
    /// transitions always count as material; transfer progress and control
    /// percentage must move beyond [`PROGRESS_EPSILON`] and
    /// [`CONTROL_EPSILON`] respectively. Publishers use this to coalesce
    /// redundant downstream work; publishing unconditionally would also be
    /// correct.
    #[must_use]
    pub fn materially_differs(&self, previous: &GameSnapshot) -> bool {
        if self.level != previous.level
            || self.paused != previous.paused
            || self.victory != previous.victory
            || self.defeat != previous.defeat
        {
            return true;
        }

        if (self.control - previous.control).abs() > CONTROL_EPSILON {
            return true;
        }

        if self.regions.len() != previous.regions.len()
            || self.transfers.len() != previous.transfers.len()
        {
            return true;
        }

        for (current, old) in self.regions.iter().zip(previous.regions.iter()) {
            if current.id != old.id || current.owner != old.owner || current.troops != old.troops {
                return true;
            }
        }

        for (current, old) in self.transfers.iter().zip(previous.transfers.iter()) {
            if current.id != old.id || (current.progress - old.progress).abs() > PROGRESS_EPSILON {
                return true;
            }
        }

        false
    }
}
