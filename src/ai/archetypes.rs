use crate::ai::patrol::PatrolPattern;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyArchetype {
    Bat,
    Ghost,
    Skeleton,
    Zombie,
    Spider,
    Slime,
    Knight,
    Wraith,
    Gargoyle,
    Rat,
}

/// Behaviour knobs for one archetype. Plain data, no logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    pub can_evade: bool,
    /// Per-second evasion likelihood while the target is close, 0..1
    pub evasion_chance: f32,
    /// Weight of the predicted target in pursuit, 0..1
    pub prediction_strength: f32,
    pub flocking_enabled: bool,
    pub patrol_pattern: PatrolPattern,
    pub wander_radius: f32,
    /// Radians per second for circular patrols
    pub patrol_angular_speed: f32,
}

const fn profile(
    can_evade: bool,
    evasion_chance: f32,
    prediction_strength: f32,
    flocking_enabled: bool,
    patrol_pattern: PatrolPattern,
    wander_radius: f32,
    patrol_angular_speed: f32,
) -> ArchetypeProfile {
    ArchetypeProfile {
        can_evade,
        evasion_chance,
        prediction_strength,
        flocking_enabled,
        patrol_pattern,
        wander_radius,
        patrol_angular_speed,
    }
}

// Indexed by `EnemyArchetype as usize`; keep in declaration order.
static ARCHETYPES: [ArchetypeProfile; 10] = [
    /* Bat      */ profile(true, 0.6, 0.3, true, PatrolPattern::Random, 3.0, 1.5),
    /* Ghost    */ profile(true, 0.4, 0.5, false, PatrolPattern::Figure8, 4.0, 1.0),
    /* Skeleton */ profile(false, 0.0, 0.6, false, PatrolPattern::Linear, 4.0, 1.0),
    /* Zombie   */ profile(false, 0.0, 0.1, true, PatrolPattern::Linear, 3.0, 1.0),
    /* Spider   */ profile(true, 0.5, 0.7, false, PatrolPattern::Random, 2.5, 1.0),
    /* Slime    */ profile(false, 0.0, 0.0, true, PatrolPattern::Circular, 2.0, 0.8),
    /* Knight   */ profile(false, 0.0, 0.8, false, PatrolPattern::Sentry, 2.0, 1.0),
    /* Wraith   */ profile(true, 0.7, 0.9, false, PatrolPattern::Circular, 3.5, 1.2),
    /* Gargoyle */ profile(false, 0.0, 0.5, false, PatrolPattern::Sentry, 3.0, 1.0),
    /* Rat      */ profile(true, 0.8, 0.2, true, PatrolPattern::Random, 2.0, 1.0),
];

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 10] = [
        EnemyArchetype::Bat,
        EnemyArchetype::Ghost,
        EnemyArchetype::Skeleton,
        EnemyArchetype::Zombie,
        EnemyArchetype::Spider,
        EnemyArchetype::Slime,
        EnemyArchetype::Knight,
        EnemyArchetype::Wraith,
        EnemyArchetype::Gargoyle,
        EnemyArchetype::Rat,
    ];

    pub fn profile(self) -> &'static ArchetypeProfile {
        &ARCHETYPES[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyArchetype::Bat => "bat",
            EnemyArchetype::Ghost => "ghost",
            EnemyArchetype::Skeleton => "skeleton",
            EnemyArchetype::Zombie => "zombie",
            EnemyArchetype::Spider => "spider",
            EnemyArchetype::Slime => "slime",
            EnemyArchetype::Knight => "knight",
            EnemyArchetype::Wraith => "wraith",
            EnemyArchetype::Gargoyle => "gargoyle",
            EnemyArchetype::Rat => "rat",
        }
    }
}

impl FromStr for EnemyArchetype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyArchetype::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::Config(format!("unknown enemy archetype '{}'", s)))
    }
}
