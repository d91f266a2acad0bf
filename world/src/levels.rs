//! Level definitions consumed from configuration.
//!
//! A level is an ordered list of region descriptors plus the cadence at which
//! the opposing AI fires. Unknown level ids deliberately fall back to the
//! default level instead of failing; campaign code relies on that policy.

use std::time::Duration;

use dominion_core::{Faction, LevelId, Position, RegionShape};
use serde::{Deserialize, Serialize};

/// Level loaded when a requested id has no definition.
pub const DEFAULT_LEVEL: LevelId = LevelId::new(1);

const AI_BASE_INTERVAL_SECS: f32 = 3.0;
const AI_INTERVAL_STEP_SECS: f32 = 0.5;
const AI_MIN_INTERVAL_SECS: f32 = 1.0;

/// Descriptor for a single region placed by a level definition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    shape: RegionShape,
    position: Position,
    size: f32,
    owner: Faction,
    troops: u32,
}

impl RegionDescriptor {
    /// Creates a new region descriptor.
    #[must_use]
    pub const fn new(
        shape: RegionShape,
        position: Position,
        size: f32,
        owner: Faction,
        troops: u32,
    ) -> Self {
        Self {
            shape,
            position,
            size,
            owner,
            troops,
        }
    }

    /// Cosmetic outline variant assigned to the region.
    #[must_use]
    pub const fn shape(&self) -> RegionShape {
        self.shape
    }

    /// Center of the region in design-space coordinates.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Scalar extent used for rendering scale and hit testing.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Faction that owns the region at level start.
    #[must_use]
    pub const fn owner(&self) -> Faction {
        self.owner
    }

    /// Requested starting garrison; ignored for neutral regions.
    #[must_use]
    pub const fn troops(&self) -> u32 {
        self.troops
    }
}

/// Complete definition of one playable level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfiguration {
    id: LevelId,
    ai_interval: Duration,
    regions: Vec<RegionDescriptor>,
}

impl LevelConfiguration {
    /// Creates a new level configuration from its parts.
    #[must_use]
    pub fn new(id: LevelId, ai_interval: Duration, regions: Vec<RegionDescriptor>) -> Self {
        Self {
            id,
            ai_interval,
            regions,
        }
    }

    /// Identifier of the level.
    #[must_use]
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// Cadence at which the AI strategist fires on this level.
    #[must_use]
    pub const fn ai_interval(&self) -> Duration {
        self.ai_interval
    }

    /// Ordered region descriptors placed by the level.
    #[must_use]
    pub fn regions(&self) -> &[RegionDescriptor] {
        &self.regions
    }
}

/// Looks up the definition for the requested level.
///
/// Unknown ids resolve to [`DEFAULT_LEVEL`].
#[must_use]
pub fn configuration(level: LevelId) -> LevelConfiguration {
    match level.get() {
        2 => level_two(),
        3 => level_three(),
        4 => level_four(),
        5 => level_five(),
        6 => level_six(),
        7 => level_seven(),
        _ => level_one(),
    }
}

/// Identifier of the last built-in level; campaigns end after clearing it.
pub const LAST_BUILTIN_LEVEL: LevelId = LevelId::new(7);

/// AI firing cadence for a level: a linear decrease per level with a floor.
#[must_use]
pub fn ai_interval_for(level: LevelId) -> Duration {
    let seconds = (AI_BASE_INTERVAL_SECS - AI_INTERVAL_STEP_SECS * level.get() as f32)
        .max(AI_MIN_INTERVAL_SECS);
    Duration::from_secs_f32(seconds)
}

fn level_one() -> LevelConfiguration {
    let id = LevelId::new(1);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(466.0, 242.0),
                170.0,
                Faction::Player,
                5,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(247.0, 201.0),
                130.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(350.0, 288.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(321.0, 137.0),
                110.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector7,
                Position::new(427.0, 119.0),
                170.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

fn level_two() -> LevelConfiguration {
    let id = LevelId::new(2);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector8,
                Position::new(568.0, 282.0),
                170.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector9,
                Position::new(569.0, 207.0),
                160.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector10,
                Position::new(489.0, 113.0),
                120.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector1,
                Position::new(195.0, 311.0),
                210.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(208.0, 188.0),
                140.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(306.0, 265.0),
                140.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(274.0, 115.0),
                130.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector5,
                Position::new(429.0, 292.0),
                155.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(399.0, 217.0),
                125.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector7,
                Position::new(371.0, 101.0),
                150.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

fn level_three() -> LevelConfiguration {
    let id = LevelId::new(3);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(574.0, 276.0),
                110.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector8,
                Position::new(563.0, 160.0),
                180.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(114.0, 279.0),
                140.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(200.0, 221.0),
                140.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector5,
                Position::new(303.0, 269.0),
                170.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(432.0, 167.0),
                150.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector7,
                Position::new(293.0, 152.0),
                140.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector9,
                Position::new(446.0, 296.0),
                160.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

fn level_four() -> LevelConfiguration {
    let id = LevelId::new(4);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(577.0, 144.0),
                210.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(526.0, 248.0),
                120.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(150.0, 79.0),
                170.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector8,
                Position::new(78.0, 185.0),
                150.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(84.0, 306.0),
                150.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(431.0, 300.0),
                180.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(255.0, 314.0),
                220.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(385.0, 183.0),
                200.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector10,
                Position::new(245.0, 177.0),
                170.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector10,
                Position::new(653.0, 273.0),
                120.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

fn level_five() -> LevelConfiguration {
    let id = LevelId::new(5);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(175.0, 106.0),
                160.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(77.0, 301.0),
                130.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector10,
                Position::new(67.0, 172.0),
                110.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector8,
                Position::new(565.0, 86.0),
                110.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector10,
                Position::new(663.0, 195.0),
                110.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(165.0, 268.0),
                140.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(280.0, 238.0),
                110.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector5,
                Position::new(281.0, 129.0),
                140.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(518.0, 263.0),
                170.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(517.0, 175.0),
                180.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector7,
                Position::new(375.0, 249.0),
                130.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector9,
                Position::new(425.0, 124.0),
                160.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

fn level_six() -> LevelConfiguration {
    let id = LevelId::new(6);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector8,
                Position::new(563.0, 255.0),
                160.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(130.0, 123.0),
                150.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(289.0, 137.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(425.0, 148.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(140.0, 260.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(571.0, 132.0),
                170.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector7,
                Position::new(312.0, 283.0),
                180.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector10,
                Position::new(461.0, 293.0),
                170.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

fn level_seven() -> LevelConfiguration {
    let id = LevelId::new(7);
    LevelConfiguration::new(
        id,
        ai_interval_for(id),
        vec![
            RegionDescriptor::new(
                RegionShape::Vector6,
                Position::new(387.0, 308.0),
                110.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(426.0, 156.0),
                90.0,
                Faction::Player,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector1,
                Position::new(118.0, 310.0),
                200.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector2,
                Position::new(143.0, 185.0),
                90.0,
                Faction::Cpu,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector1,
                Position::new(522.0, 227.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(505.0, 327.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector3,
                Position::new(244.0, 268.0),
                180.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(331.0, 187.0),
                130.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(519.0, 120.0),
                80.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector4,
                Position::new(636.0, 326.0),
                160.0,
                Faction::Neutral,
                0,
            ),
            RegionDescriptor::new(
                RegionShape::Vector8,
                Position::new(612.0, 161.0),
                100.0,
                Faction::Neutral,
                0,
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_falls_back_to_default() {
        let fallback = configuration(LevelId::new(99));
        assert_eq!(fallback.id(), DEFAULT_LEVEL);
        assert_eq!(fallback, configuration(DEFAULT_LEVEL));
    }

    #[test]
    fn ai_interval_decreases_linearly_with_a_floor() {
        assert_eq!(ai_interval_for(LevelId::new(1)), Duration::from_millis(2500));
        assert_eq!(ai_interval_for(LevelId::new(2)), Duration::from_secs(2));
        assert_eq!(ai_interval_for(LevelId::new(3)), Duration::from_millis(1500));
        assert_eq!(ai_interval_for(LevelId::new(4)), Duration::from_secs(1));
        assert_eq!(ai_interval_for(LevelId::new(40)), Duration::from_secs(1));
    }

    #[test]
    fn every_builtin_level_has_a_player_presence() {
        for id in 1..=LAST_BUILTIN_LEVEL.get() {
            let config = configuration(LevelId::new(id));
            assert!(
                config
                    .regions()
                    .iter()
                    .any(|descriptor| descriptor.owner() == Faction::Player),
                "level {id} has no player region"
            );
        }
    }

    #[test]
    fn every_builtin_level_past_the_first_has_an_opponent() {
        for id in 2..=LAST_BUILTIN_LEVEL.get() {
            let config = configuration(LevelId::new(id));
            assert!(
                config
                    .regions()
                    .iter()
                    .any(|descriptor| descriptor.owner() == Faction::Cpu),
                "level {id} has no cpu region"
            );
        }
    }

    #[test]
    fn builtin_levels_match_their_requested_ids() {
        for id in 1..=LAST_BUILTIN_LEVEL.get() {
            assert_eq!(configuration(LevelId::new(id)).id(), LevelId::new(id));
        }
    }

    #[test]
    fn clearing_any_builtin_level_unlocks_a_real_definition() {
        // The level after each cleared one must resolve to its own
        // definition, not the fallback, or the campaign stalls.
        for cleared in 1..LAST_BUILTIN_LEVEL.get() {
            let next = LevelId::new(cleared + 1);
            assert_eq!(configuration(next).id(), next);
        }
    }
}
