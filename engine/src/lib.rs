#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level lifecycle, fixed-cadence clock, and snapshot publication.
//!
//! The engine wires the authoritative world to the AI strategist and drives
//! both from wall-clock time. Presentation layers register a [`SnapshotSink`]
//! and receive a coalesced [`GameSnapshot`] stream: one publication per tick
//! whose state differs materially from the previous publication.

pub mod progress;

use std::time::{Duration, Instant};

use dominion_core::{Command, Event, Faction, GameSnapshot, LevelId, RegionId};
use dominion_system_ai::{AiStrategist, Config as AiConfig};
use dominion_world::{self as world, levels, levels::LevelConfiguration, query, World};
use log::{debug, info, warn};
use progress::CampaignProgress;

/// Smallest wall-clock gap between ticks the clock will simulate.
pub const MIN_TICK_ELAPSED: Duration = Duration::from_millis(10);

/// Receiver for coalesced game snapshots.
pub trait SnapshotSink {
    /// Accepts a freshly published snapshot.
    fn publish(&mut self, snapshot: &GameSnapshot);
}

/// Phase of the current level attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// No level has been started yet.
    NotStarted,
    /// The simulation is advancing.
    Running,
    /// The simulation holds all state until resumed.
    Paused,
    /// Every region is player-owned; the attempt is over.
    Victory,
    /// The player owns no region; the attempt is over.
    Defeat,
}

/// Drives the world and the AI strategist from wall-clock time.
#[derive(Debug)]
pub struct GameClock {
    world: World,
    strategist: AiStrategist,
    lifecycle: Lifecycle,
    last_update: Option<Instant>,
    last_published: Option<GameSnapshot>,
    progress: CampaignProgress,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Creates a clock with fresh campaign progress and no level loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::with_progress(CampaignProgress::default())
    }

    /// Creates a clock restoring previously persisted campaign progress.
    #[must_use]
    pub fn with_progress(progress: CampaignProgress) -> Self {
        Self {
            world: World::new(),
            strategist: AiStrategist::new(AiConfig::new(Duration::ZERO)),
            lifecycle: Lifecycle::NotStarted,
            last_update: None,
            last_published: None,
            progress,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Campaign progress accumulated so far.
    #[must_use]
    pub const fn progress(&self) -> &CampaignProgress {
        &self.progress
    }

    /// Snapshot of the current world state, bypassing coalescing.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        query::game_snapshot(&self.world)
    }

    /// Starts an attempt of a built-in level.
    pub fn start_level(&mut self, level: LevelId, sink: &mut dyn SnapshotSink) {
        let configuration = levels::configuration(level);
        self.start_configuration(&configuration, sink);
    }

    /// Starts an attempt of an externally supplied level configuration.
    pub fn start_configuration(
        &mut self,
        configuration: &LevelConfiguration,
        sink: &mut dyn SnapshotSink,
    ) {
        let mut events = Vec::new();
        self.world.load_configuration(configuration, &mut events);
        self.strategist = AiStrategist::new(AiConfig::new(configuration.ai_interval()));
        // Feed the load event through so a strategist reused across levels
        // drops any banked cadence.
        let mut commands = Vec::new();
        self.strategist
            .handle(&events, &query::region_view(&self.world), &mut commands);
        debug_assert!(commands.is_empty());
        self.lifecycle = Lifecycle::Running;
        self.last_update = None;
        self.last_published = None;
        info!("attempt started on {}", configuration.id());
        self.publish_if_changed(sink);
    }

    /// Advances the simulation from wall-clock time.
    ///
    /// The first call after a start or resume only anchors the clock. Calls
    /// closer together than [`MIN_TICK_ELAPSED`] are absorbed without
    /// simulating, so callers may poll as often as they like.
    pub fn tick_now(&mut self, now: Instant, sink: &mut dyn SnapshotSink) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let Some(previous) = self.last_update else {
            self.last_update = Some(now);
            return;
        };
        let elapsed = now.saturating_duration_since(previous);
        if elapsed < MIN_TICK_ELAPSED {
            return;
        }
        self.last_update = Some(now);
        self.advance(elapsed, sink);
    }

    /// Advances the simulation by an explicit amount of simulated time.
    pub fn advance(&mut self, elapsed: Duration, sink: &mut dyn SnapshotSink) {
        if self.lifecycle != Lifecycle::Running || elapsed.is_zero() {
            return;
        }

        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt: elapsed }, &mut events);

        let mut orders = Vec::new();
        self.strategist
            .handle(&events, &query::region_view(&self.world), &mut orders);
        for order in orders {
            world::apply(&mut self.world, order, &mut events);
        }

        self.absorb(&events);
        self.publish_if_changed(sink);
    }

    /// Suspends the simulation; no time accrues until [`Self::resume`].
    pub fn pause(&mut self, sink: &mut dyn SnapshotSink) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SetPaused { paused: true },
            &mut events,
        );
        self.lifecycle = Lifecycle::Paused;
        self.last_update = None;
        self.publish_if_changed(sink);
    }

    /// Resumes a paused attempt, re-anchoring the clock at `now`.
    ///
    /// Wall-clock time spent paused is never simulated.
    pub fn resume(&mut self, now: Instant, sink: &mut dyn SnapshotSink) {
        if self.lifecycle != Lifecycle::Paused {
            return;
        }
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SetPaused { paused: false },
            &mut events,
        );
        self.lifecycle = Lifecycle::Running;
        self.last_update = Some(now);
        self.publish_if_changed(sink);
    }

    /// Issues a player order to move troops between regions.
    ///
    /// Returns whether the world dispatched the transfer. Rejections leave
    /// the world untouched and are reported through the log.
    pub fn send_troops(&mut self, source: RegionId, destination: RegionId, count: u32) -> bool {
        if self.lifecycle != Lifecycle::Running {
            return false;
        }
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SendTroops {
                source,
                destination,
                count,
                issuer: Faction::Player,
            },
            &mut events,
        );
        let mut dispatched = false;
        for event in &events {
            match event {
                Event::TransferDispatched { .. } => dispatched = true,
                Event::TransferRejected { reason, .. } => {
                    warn!("player order rejected: {reason}");
                }
                _ => {}
            }
        }
        dispatched
    }

    fn absorb(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::RegionCaptured { new_owner, .. } if *new_owner == Faction::Player => {
                    self.progress.record_capture();
                }
                Event::VictoryAchieved => {
                    let level = query::level(&self.world);
                    self.progress.record_victory(level);
                    self.lifecycle = Lifecycle::Victory;
                    info!("{level} complete; next up {}", self.progress.current_level());
                }
                Event::DefeatSuffered => {
                    self.lifecycle = Lifecycle::Defeat;
                }
                Event::TransferRejected { reason, .. } => {
                    debug!("order rejected mid-tick: {reason}");
                }
                _ => {}
            }
        }
    }

    fn publish_if_changed(&mut self, sink: &mut dyn SnapshotSink) {
        let snapshot = query::game_snapshot(&self.world);
        let changed = self
            .last_published
            .as_ref()
            .map_or(true, |previous| snapshot.materially_differs(previous));
        if changed {
            sink.publish(&snapshot);
            self.last_published = Some(snapshot);
        }
    }
}
