#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that runs scripted Dominion attempts.
//!
//! Drives the engine at a fixed tick cadence, prints each coalesced snapshot
//! to stdout, and optionally lets a seeded bot stand in for player input so
//! whole attempts can run unattended.

mod bot;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::Context;
use bot::PlayerBot;
use clap::Parser;
use dominion_core::{Faction, GameSnapshot, LevelId};
use dominion_engine::{GameClock, Lifecycle, SnapshotSink};
use dominion_world::levels::LevelConfiguration;
use log::debug;

#[derive(Debug, Parser)]
#[command(name = "dominion", about = "Headless runner for the Dominion simulation")]
struct Args {
    /// Built-in level to attempt.
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// JSON level definition to attempt instead of a built-in level.
    #[arg(long, value_name = "PATH", conflicts_with = "level")]
    level_file: Option<PathBuf>,

    /// Maximum number of ticks to simulate before giving up.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Seed for the scripted player bot.
    #[arg(long, default_value_t = 0x00d0_0d1e)]
    seed: u64,

    /// Disable the scripted player bot and let the level run unopposed.
    #[arg(long)]
    no_bot: bool,
}

struct ConsoleSink {
    published: usize,
}

impl SnapshotSink for ConsoleSink {
    fn publish(&mut self, snapshot: &GameSnapshot) {
        self.published += 1;
        let player = count_owned(snapshot, Faction::Player);
        let cpu = count_owned(snapshot, Faction::Cpu);
        let neutral = count_owned(snapshot, Faction::Neutral);
        let state = if snapshot.victory {
            "victory"
        } else if snapshot.defeat {
            "defeat"
        } else if snapshot.paused {
            "paused"
        } else {
            "running"
        };
        println!(
            "[{}] control {:>3.0}% | player/cpu/neutral {player}/{cpu}/{neutral} | transfers {} | {state}",
            snapshot.level,
            snapshot.control * 100.0,
            snapshot.transfers.len(),
        );
    }
}

fn count_owned(snapshot: &GameSnapshot, owner: Faction) -> usize {
    snapshot
        .regions
        .iter()
        .filter(|region| region.owner == owner)
        .count()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut clock = GameClock::new();
    let mut sink = ConsoleSink { published: 0 };

    if let Some(path) = &args.level_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        let configuration: LevelConfiguration = serde_json::from_str(&text)
            .with_context(|| format!("parsing level file {}", path.display()))?;
        clock.start_configuration(&configuration, &mut sink);
    } else {
        clock.start_level(LevelId::new(args.level), &mut sink);
    }

    let tick = Duration::from_millis(args.tick_ms);
    let mut player = (!args.no_bot).then(|| PlayerBot::new(args.seed));

    for _ in 0..args.ticks {
        clock.advance(tick, &mut sink);
        if let Some(bot) = player.as_mut() {
            let snapshot = clock.snapshot();
            if let Some((source, destination, count)) = bot.decide(tick, &snapshot.regions) {
                if !clock.send_troops(source, destination, count) {
                    debug!("bot order {source} -> {destination} was rejected");
                }
            }
        }
        if matches!(clock.lifecycle(), Lifecycle::Victory | Lifecycle::Defeat) {
            break;
        }
    }

    let progress = clock.progress();
    let outcome = match clock.lifecycle() {
        Lifecycle::Victory => "victory",
        Lifecycle::Defeat => "defeat",
        _ => "unresolved",
    };
    println!(
        "{outcome} after {} snapshots | coins {} | games won {} | regions captured {} | next {}",
        sink.published,
        progress.coins(),
        progress.games_won(),
        progress.regions_captured(),
        progress.current_level(),
    );
    Ok(())
}
