use crate::ai::SteeringConfig;
use crate::audio::oscillators::WaveShape;
use crate::audio::pool::DEFAULT_POOL_SIZE;
use crate::audio::synth::validate_recipe;
use crate::audio::SoundRecipe;
use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Everything the service root needs at construction. Every section has a
/// default, so a partial JSON file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub audio: AudioConfig,
    pub ai: SteeringConfig,
    pub logging: LoggingConfig,
    /// Extra named recipes, playable through `play_named`
    pub sounds: HashMap<String, SoundRecipe>,
    /// Looping music tracks, rendered on first use
    pub music: HashMap<String, SoundRecipe>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            ai: SteeringConfig::default(),
            logging: LoggingConfig::default(),
            sounds: HashMap::new(),
            music: default_music(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub pool_size: usize,
    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
    /// Spatial voices are silent at or beyond this distance from the listener
    pub spatial_max_distance: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            master_volume: 1.0,
            music_volume: 0.6,
            sfx_volume: 1.0,
            muted: false,
            spatial_max_distance: 20.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects unusable values and clamps the rest into range.
    pub fn validated(mut self) -> Result<Self> {
        if self.audio.pool_size == 0 {
            return Err(Error::Config("audio.pool_size must be at least 1".into()));
        }

        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        self.audio.master_volume = unit(self.audio.master_volume);
        self.audio.music_volume = unit(self.audio.music_volume);
        self.audio.sfx_volume = unit(self.audio.sfx_volume);

        let max_distance = self.audio.spatial_max_distance;
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(Error::Config(
                "audio.spatial_max_distance must be a positive number".into(),
            ));
        }

        for (name, recipe) in self.sounds.iter().chain(self.music.iter()) {
            validate_recipe(recipe).map_err(|err| match err {
                Error::InvalidRecipe(reason) => {
                    Error::InvalidRecipe(format!("'{}': {}", name, reason))
                }
                other => other,
            })?;
        }

        self.ai = self.ai.sanitized();
        Ok(self)
    }
}

/// Short looping chiptune phrases in A minor.
pub fn default_music() -> HashMap<String, SoundRecipe> {
    let castle_theme = SoundRecipe::Sequence {
        notes: vec![
            (220.0, 0.4),
            (261.63, 0.4),
            (329.63, 0.4),
            (293.66, 0.4),
            (261.63, 0.4),
            (246.94, 0.4),
            (220.0, 0.8),
        ],
        shape: WaveShape::Triangle,
    };
    let boss_theme = SoundRecipe::Sequence {
        notes: vec![
            (110.0, 0.2),
            (110.0, 0.2),
            (130.81, 0.2),
            (110.0, 0.2),
            (155.56, 0.2),
            (146.83, 0.4),
        ],
        shape: WaveShape::Square,
    };

    HashMap::from([
        ("castle-theme".to_string(), castle_theme),
        ("boss-theme".to_string(), boss_theme),
    ])
}
