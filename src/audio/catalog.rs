use crate::audio::oscillators::WaveShape;
use crate::error::Error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How a clip is synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SoundRecipe {
    Tone {
        frequency: f32,
        duration: f32,
        shape: WaveShape,
    },
    /// (frequency, duration) pairs sharing one shape
    Sequence {
        notes: Vec<(f32, f32)>,
        shape: WaveShape,
    },
    Sweep {
        start_frequency: f32,
        end_frequency: f32,
        duration: f32,
        shape: WaveShape,
    },
    Noise {
        duration: f32,
    },
}

impl SoundRecipe {
    fn sequence(notes: &[(f32, f32)], shape: WaveShape) -> Self {
        SoundRecipe::Sequence {
            notes: notes.to_vec(),
            shape,
        }
    }

    fn sweep(start_frequency: f32, end_frequency: f32, duration: f32, shape: WaveShape) -> Self {
        SoundRecipe::Sweep {
            start_frequency,
            end_frequency,
            duration,
            shape,
        }
    }

    pub fn total_duration(&self) -> f32 {
        match self {
            SoundRecipe::Tone { duration, .. }
            | SoundRecipe::Sweep { duration, .. }
            | SoundRecipe::Noise { duration } => *duration,
            SoundRecipe::Sequence { notes, .. } => notes.iter().map(|&(_, d)| d).sum(),
        }
    }
}

/// Game events that have a procedural sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundEffect {
    Pickup,
    KeyPickup,
    DoorOpen,
    DoorLocked,
    PlayerHurt,
    PlayerDeath,
    EnemyHit,
    EnemyDeath,
    Attack,
    Magic,
    MenuSelect,
    MenuConfirm,
    GreatKeyFanfare,
    Stairs,
    SecretPassage,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 15] = [
        SoundEffect::Pickup,
        SoundEffect::KeyPickup,
        SoundEffect::DoorOpen,
        SoundEffect::DoorLocked,
        SoundEffect::PlayerHurt,
        SoundEffect::PlayerDeath,
        SoundEffect::EnemyHit,
        SoundEffect::EnemyDeath,
        SoundEffect::Attack,
        SoundEffect::Magic,
        SoundEffect::MenuSelect,
        SoundEffect::MenuConfirm,
        SoundEffect::GreatKeyFanfare,
        SoundEffect::Stairs,
        SoundEffect::SecretPassage,
    ];

    /// Stable key, also used as the clip cache key.
    pub fn key(self) -> &'static str {
        match self {
            SoundEffect::Pickup => "pickup",
            SoundEffect::KeyPickup => "key-pickup",
            SoundEffect::DoorOpen => "door-open",
            SoundEffect::DoorLocked => "door-locked",
            SoundEffect::PlayerHurt => "player-hurt",
            SoundEffect::PlayerDeath => "player-death",
            SoundEffect::EnemyHit => "enemy-hit",
            SoundEffect::EnemyDeath => "enemy-death",
            SoundEffect::Attack => "attack",
            SoundEffect::Magic => "magic",
            SoundEffect::MenuSelect => "menu-select",
            SoundEffect::MenuConfirm => "menu-confirm",
            SoundEffect::GreatKeyFanfare => "great-key-fanfare",
            SoundEffect::Stairs => "stairs",
            SoundEffect::SecretPassage => "secret-passage",
        }
    }

    pub fn recipe(self) -> &'static SoundRecipe {
        &CATALOG[&self]
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SoundEffect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundEffect::ALL
            .into_iter()
            .find(|effect| effect.key() == s)
            .ok_or_else(|| Error::UnknownSound(s.to_string()))
    }
}

static CATALOG: Lazy<HashMap<SoundEffect, SoundRecipe>> = Lazy::new(|| {
    use SoundEffect::*;
    use WaveShape::*;

    HashMap::from([
        // C5 E5 G5 arpeggio
        (Pickup, SoundRecipe::sequence(&[(523.25, 0.05), (659.25, 0.05), (783.99, 0.1)], Square)),
        (KeyPickup, SoundRecipe::sequence(&[(659.25, 0.08), (783.99, 0.08), (1046.5, 0.15)], Triangle)),
        (DoorOpen, SoundRecipe::sweep(120.0, 260.0, 0.35, Sawtooth)),
        (DoorLocked, SoundRecipe::sequence(&[(150.0, 0.15), (100.0, 0.2)], Square)),
        (PlayerHurt, SoundRecipe::sweep(440.0, 150.0, 0.2, Square)),
        (PlayerDeath, SoundRecipe::sequence(
            &[(392.0, 0.15), (329.63, 0.15), (261.63, 0.15), (196.0, 0.45)],
            Triangle,
        )),
        (EnemyHit, SoundRecipe::Noise { duration: 0.1 }),
        (EnemyDeath, SoundRecipe::sweep(200.0, 80.0, 0.3, Noise)),
        (Attack, SoundRecipe::sweep(900.0, 300.0, 0.1, Sawtooth)),
        (Magic, SoundRecipe::sweep(300.0, 1200.0, 0.4, Sine)),
        (MenuSelect, SoundRecipe::Tone { frequency: 440.0, duration: 0.05, shape: Square }),
        (MenuConfirm, SoundRecipe::sequence(&[(523.25, 0.06), (783.99, 0.12)], Square)),
        (GreatKeyFanfare, SoundRecipe::sequence(
            &[
                (523.25, 0.12),
                (659.25, 0.12),
                (783.99, 0.12),
                (1046.5, 0.3),
                (783.99, 0.12),
                (1046.5, 0.5),
            ],
            Triangle,
        )),
        (Stairs, SoundRecipe::sequence(
            &[(330.0, 0.08), (294.0, 0.08), (262.0, 0.08), (220.0, 0.12)],
            Triangle,
        )),
        (SecretPassage, SoundRecipe::sequence(
            &[(392.0, 0.1), (369.99, 0.1), (311.13, 0.1), (220.0, 0.1), (207.65, 0.1), (329.63, 0.1), (415.3, 0.1), (523.25, 0.3)],
            Sine,
        )),
    ])
});
