use std::time::Duration;

use dominion_core::{Command, Event, Faction, LevelId, Position, RegionId, RegionShape};
use dominion_system_ai::{AiStrategist, Config};
use dominion_world::{
    self as world,
    levels::{LevelConfiguration, RegionDescriptor},
    query, World,
};

fn descriptor(owner: Faction, troops: u32, x: f32) -> RegionDescriptor {
    RegionDescriptor::new(RegionShape::Vector1, Position::new(x, 0.0), 100.0, owner, troops)
}

fn loaded_world(descriptors: Vec<RegionDescriptor>) -> World {
    let mut world = World::new();
    let configuration =
        LevelConfiguration::new(LevelId::new(1), Duration::from_secs(3), descriptors);
    world.load_configuration(&configuration, &mut Vec::new());
    world
}

#[test]
fn no_order_before_the_interval_elapses() {
    let world = loaded_world(vec![
        descriptor(Faction::Cpu, 8, 0.0),
        descriptor(Faction::Neutral, 0, 10.0),
    ]);
    let mut strategist = AiStrategist::new(Config::new(Duration::from_secs(3)));

    let mut commands = Vec::new();
    strategist.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(2),
        }],
        &query::region_view(&world),
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn fires_a_validated_order_the_world_accepts() {
    let mut world = loaded_world(vec![
        descriptor(Faction::Cpu, 8, 0.0),
        descriptor(Faction::Neutral, 0, 10.0),
        descriptor(Faction::Player, 4, 200.0),
    ]);
    let mut strategist = AiStrategist::new(Config::new(Duration::from_secs(3)));

    let mut commands = Vec::new();
    strategist.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(3),
        }],
        &query::region_view(&world),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![Command::SendTroops {
            source: RegionId::new(0),
            destination: RegionId::new(1),
            count: 8,
            issuer: Faction::Cpu,
        }]
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert!(matches!(events[0], Event::TransferDispatched { .. }));
    assert_eq!(
        query::region(&world, RegionId::new(0)).map(|snapshot| snapshot.troops),
        Some(0),
        "the full garrison departs"
    );
}

#[test]
fn a_large_batch_does_not_reuse_a_drained_garrison() {
    let world = loaded_world(vec![
        descriptor(Faction::Cpu, 8, 0.0),
        descriptor(Faction::Cpu, 6, 5.0),
        descriptor(Faction::Neutral, 0, 10.0),
    ]);
    let mut strategist = AiStrategist::new(Config::new(Duration::from_secs(1)));

    let mut commands = Vec::new();
    strategist.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(2),
        }],
        &query::region_view(&world),
        &mut commands,
    );

    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands,
        vec![
            Command::SendTroops {
                source: RegionId::new(0),
                destination: RegionId::new(2),
                count: 8,
                issuer: Faction::Cpu,
            },
            Command::SendTroops {
                source: RegionId::new(1),
                destination: RegionId::new(2),
                count: 6,
                issuer: Faction::Cpu,
            },
        ]
    );
}

#[test]
fn level_load_resets_the_cadence() {
    let world = loaded_world(vec![
        descriptor(Faction::Cpu, 8, 0.0),
        descriptor(Faction::Neutral, 0, 10.0),
    ]);
    let mut strategist = AiStrategist::new(Config::new(Duration::from_secs(3)));

    let mut commands = Vec::new();
    strategist.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(2),
        }],
        &query::region_view(&world),
        &mut commands,
    );
    strategist.handle(
        &[Event::LevelLoaded {
            level: LevelId::new(1),
            region_count: 2,
        }],
        &query::region_view(&world),
        &mut commands,
    );
    strategist.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(2),
        }],
        &query::region_view(&world),
        &mut commands,
    );
    assert!(commands.is_empty(), "banked time must not survive a reload");
}
