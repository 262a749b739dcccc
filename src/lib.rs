//! Procedural sound effects, enemy steering and transient visual effects for
//! Haunted Castle.
//!
//! [`HauntedCastle`] is the explicitly constructed service root: it owns the
//! audio server, the command/event queues, the effect list and the game
//! clock. Hosts create one and pass it (or pieces of it) to their systems.

pub mod ai;
pub mod audio;
#[cfg(feature = "output")]
pub mod audio_output;
pub mod commands;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod logging;
pub mod timing;

pub use ai::{AiAgent, EnemyArchetype, SteeringInput};
pub use audio::{AudioServer, SoundEffect, SoundRecipe, SynthesizedClip};
pub use commands::{AudioCommand, AudioCommandQueue, AudioCommandSender};
pub use config::EngineConfig;
pub use effects::ActiveEffects;
pub use error::{Error, Result};
pub use events::{PlaybackEvent, PlaybackEventQueue, PlaybackEventReceiver};
pub use timing::GameClock;

use glam::Vec2;
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "output")]
type OutputHandle = audio_output::AudioOutput;
#[cfg(not(feature = "output"))]
type OutputHandle = ();

pub struct HauntedCastle {
    config: EngineConfig,
    audio: Arc<Mutex<AudioServer>>,
    commands: AudioCommandQueue,
    events: PlaybackEventQueue,
    effects: ActiveEffects,
    clock: GameClock,
    output: Option<OutputHandle>,
}

impl HauntedCastle {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let config = config.validated()?;
        let events = PlaybackEventQueue::new();

        let mut server = AudioServer::new(&config.audio);
        server.set_event_sender(events.sender());
        for (name, recipe) in &config.sounds {
            server.register_sound(name.clone(), recipe.clone());
        }
        for (name, recipe) in &config.music {
            server.register_music_recipe(name.clone(), recipe.clone());
        }

        tracing::info!(
            pool_size = config.audio.pool_size,
            sounds = config.sounds.len(),
            music = config.music.len(),
            "haunted castle services ready"
        );

        Ok(Self {
            config,
            audio: Arc::new(Mutex::new(server)),
            commands: AudioCommandQueue::new(),
            events,
            effects: ActiveEffects::new(),
            clock: GameClock::new(),
            output: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared handle for direct calls from the simulation thread.
    pub fn audio(&self) -> Arc<Mutex<AudioServer>> {
        Arc::clone(&self.audio)
    }

    /// Queue handle for fire-and-forget audio control.
    pub fn audio_commands(&self) -> AudioCommandSender {
        self.commands.sender()
    }

    pub fn playback_events(&self) -> PlaybackEventReceiver {
        self.events.receiver()
    }

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut ActiveEffects {
        &mut self.effects
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    /// New steering agent using the configured tunables.
    pub fn spawn_agent(&self, archetype: EnemyArchetype, home: Vec2) -> AiAgent {
        AiAgent::new(archetype, home, self.config.ai.clone())
    }

    /// Advances the clock and expires finished effects. Returns the scaled
    /// delta for gameplay systems.
    ///
    /// Without a running output stream, queued audio commands are applied
    /// here so server state stays current.
    pub fn tick(&mut self, real_dt: f32) -> f32 {
        let scaled_dt = self.clock.advance(real_dt);
        self.effects.update(self.clock.unscaled_time());

        if !self.is_audio_running() {
            let receiver = self.commands.receiver();
            let mut server = self.audio.lock();
            while receiver.has_commands() {
                receiver.process_commands(|command| server.apply_command(command));
            }
        }

        scaled_dt
    }

    /// Renders every catalog effect, custom sound and music recipe into the
    /// clip cache. `start_audio` calls this before opening the stream.
    pub fn preload_audio(&self) -> Result<()> {
        self.audio.lock().preload_all()
    }

    /// Opens the default output device. Failure is logged and leaves the
    /// engine running silently.
    #[cfg(feature = "output")]
    pub fn start_audio(&mut self) -> bool {
        if self.output.is_some() {
            return true;
        }
        if let Err(err) = self.preload_audio() {
            tracing::warn!(error = %err, "preload failed; clips render on demand");
        }

        match audio_output::AudioOutput::new(Arc::clone(&self.audio), self.commands.receiver()) {
            Ok(output) => {
                self.output = Some(output);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "audio output unavailable, continuing silently");
                false
            }
        }
    }

    #[cfg(not(feature = "output"))]
    pub fn start_audio(&mut self) -> bool {
        tracing::warn!("built without the `output` feature, continuing silently");
        false
    }

    pub fn stop_audio(&mut self) {
        if self.output.take().is_some() {
            tracing::info!("audio output stopped");
        }
    }

    pub fn is_audio_running(&self) -> bool {
        self.output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Color;

    #[test]
    fn test_queued_commands_apply_without_output() {
        let mut castle = HauntedCastle::new(EngineConfig::default()).unwrap();
        let sender = castle.audio_commands();
        sender.send(AudioCommand::PlayMusic("castle-theme".into()));
        sender.send(AudioCommand::PlayEffect(SoundEffect::Pickup));

        castle.tick(0.016);
        assert_eq!(castle.audio().lock().current_music(), Some("castle-theme"));

        let events = castle.playback_events().drain();
        assert!(events.contains(&PlaybackEvent::MusicStarted("castle-theme".into())));
        assert!(events.contains(&PlaybackEvent::EffectStarted {
            channel: 0,
            effect: Some(SoundEffect::Pickup)
        }));
    }

    #[test]
    fn test_effects_expire_while_paused() {
        let mut castle = HauntedCastle::new(EngineConfig::default()).unwrap();
        castle.clock_mut().pause();
        let now = castle.clock().unscaled_time();
        castle.effects_mut().hit_flash(now, Vec2::ZERO, Color::WHITE);

        assert_eq!(castle.tick(0.5), 0.0);
        assert!(castle.effects().is_empty());
        assert_eq!(castle.clock().scaled_time(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.audio.pool_size = 0;
        assert!(matches!(HauntedCastle::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_custom_sounds_registered() {
        let mut config = EngineConfig::default();
        config
            .sounds
            .insert("chime".into(), SoundRecipe::Noise { duration: 0.05 });
        let castle = HauntedCastle::new(config).unwrap();
        assert_eq!(castle.audio().lock().play_named("chime"), Some(0));
    }

    #[test]
    fn test_preload_covers_config_recipes() {
        let mut config = EngineConfig::default();
        config
            .sounds
            .insert("creak".into(), SoundRecipe::Noise { duration: 0.05 });
        let castle = HauntedCastle::new(config).unwrap();
        castle.preload_audio().unwrap();

        let audio = castle.audio();
        let server = audio.lock();
        assert!(server.cache().contains("sound/creak"));
        assert!(server.cache().contains("music/castle-theme"));
        assert!(server.cache().contains("music/boss-theme"));
        assert!(server.cache().contains("pickup"));
    }
}
