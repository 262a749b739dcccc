use crate::audio::cache::ClipCache;
use crate::audio::catalog::{SoundEffect, SoundRecipe};
use crate::audio::pool::{PlaybackChannel, PlaybackPool};
use crate::audio::synth::{ClipSynthesizer, SynthesizedClip};
use crate::audio::{AudioGenerator, StereoAudioGenerator, PI};
use crate::commands::AudioCommand;
use crate::config::AudioConfig;
use crate::error::{Error, Result};
use crate::events::{PlaybackEvent, PlaybackEventSender};
use glam::Vec2;
use std::collections::HashMap;
use std::sync::Arc;

/// Oldest spatial voice is dropped once this many are sounding.
const MAX_SPATIAL_VOICES: usize = 16;

enum TrackSource {
    Recipe(SoundRecipe),
    Clip(Arc<SynthesizedClip>),
}

/// Fire-and-forget voice with gains fixed at start.
struct SpatialVoice {
    clip: Arc<SynthesizedClip>,
    cursor: usize,
    left_gain: f32,
    right_gain: f32,
}

impl SpatialVoice {
    fn is_finished(&self) -> bool {
        self.cursor >= self.clip.len()
    }
}

impl StereoAudioGenerator for SpatialVoice {
    fn next_frame(&mut self) -> (f32, f32) {
        let Some(&sample) = self.clip.samples().get(self.cursor) else {
            return (0.0, 0.0);
        };
        self.cursor += 1;
        (sample * self.left_gain, sample * self.right_gain)
    }
}

/// Linear distance falloff and equal-power pan of `source` heard from `listener`.
pub fn spatial_gains(listener: Vec2, source: Vec2, max_distance: f32) -> (f32, f32) {
    let offset = source - listener;
    let attenuation = (1.0 - offset.length() / max_distance).clamp(0.0, 1.0);
    let pan = (offset.x / max_distance).clamp(-1.0, 1.0);
    let angle = (pan + 1.0) * PI / 4.0;
    (attenuation * angle.cos(), attenuation * angle.sin())
}

fn sanitize_output(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Mixes pooled effects, one music channel and spatial voices.
///
/// Clips are synthesized on first use through a shared [`ClipCache`]; call
/// [`AudioServer::preload_all`] before starting the output stream to keep
/// synthesis off the audio thread.
pub struct AudioServer {
    cache: Arc<ClipCache>,
    synth: ClipSynthesizer,
    pool: PlaybackPool,

    music: PlaybackChannel,
    music_track: Option<String>,
    tracks: HashMap<String, TrackSource>,

    spatial: Vec<SpatialVoice>,
    listener: Vec2,
    spatial_max_distance: f32,

    sounds: HashMap<String, SoundRecipe>,
    overrides: HashMap<SoundEffect, Arc<SynthesizedClip>>,

    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,

    events: Option<PlaybackEventSender>,
}

impl AudioServer {
    pub fn new(config: &AudioConfig) -> Self {
        Self::with_cache(config, Arc::new(ClipCache::new()))
    }

    pub fn with_cache(config: &AudioConfig, cache: Arc<ClipCache>) -> Self {
        let mut server = Self {
            cache,
            synth: ClipSynthesizer::new(),
            pool: PlaybackPool::new(config.pool_size),
            music: PlaybackChannel::new(),
            music_track: None,
            tracks: HashMap::new(),
            spatial: Vec::new(),
            listener: Vec2::ZERO,
            spatial_max_distance: config.spatial_max_distance.max(f32::EPSILON),
            sounds: HashMap::new(),
            overrides: HashMap::new(),
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            muted: config.muted,
            events: None,
        };
        server.set_master_volume(config.master_volume);
        server.set_music_volume(config.music_volume);
        server.set_sfx_volume(config.sfx_volume);
        server
    }

    pub fn set_event_sender(&mut self, sender: PlaybackEventSender) {
        self.events = Some(sender);
    }

    fn emit(&self, event: PlaybackEvent) {
        if let Some(events) = &self.events {
            events.send(event);
        }
    }

    pub fn cache(&self) -> &Arc<ClipCache> {
        &self.cache
    }

    pub fn pool(&self) -> &PlaybackPool {
        &self.pool
    }

    /// Synthesizes every catalog effect into the cache.
    pub fn preload_catalog(&self) -> Result<()> {
        for effect in SoundEffect::ALL {
            self.catalog_clip(effect)?;
        }
        tracing::debug!(count = self.cache.len(), "catalog preloaded");
        Ok(())
    }

    /// Synthesizes the catalog plus every registered sound and music recipe,
    /// so nothing renders later on the output thread.
    pub fn preload_all(&self) -> Result<()> {
        self.preload_catalog()?;
        for name in self.sounds.keys() {
            self.resolve_named(name)?;
        }
        for (name, source) in &self.tracks {
            if let TrackSource::Recipe(_) = source {
                self.resolve_music(name)?;
            }
        }
        tracing::debug!(count = self.cache.len(), "sounds and music preloaded");
        Ok(())
    }

    fn catalog_clip(&self, effect: SoundEffect) -> Result<Arc<SynthesizedClip>> {
        let synth = self.synth;
        self.cache
            .get_or_create(effect.key(), || synth.render(effect.recipe()))
    }

    /// Assigned override first, otherwise the cached catalog clip.
    pub fn resolve_effect(&self, effect: SoundEffect) -> Result<Arc<SynthesizedClip>> {
        match self.overrides.get(&effect) {
            Some(clip) => Ok(Arc::clone(clip)),
            None => self.catalog_clip(effect),
        }
    }

    /// Custom sound by name, falling back to catalog keys.
    pub fn resolve_named(&self, key: &str) -> Result<Arc<SynthesizedClip>> {
        if let Some(recipe) = self.sounds.get(key) {
            let synth = self.synth;
            return self
                .cache
                .get_or_create(&format!("sound/{}", key), || synth.render(recipe));
        }
        let effect: SoundEffect = key.parse()?;
        self.resolve_effect(effect)
    }

    // Effects

    /// Starts `effect` on the next pool channel and returns its index.
    ///
    /// `None` when muted or when the clip cannot be produced.
    pub fn play_effect(&mut self, effect: SoundEffect) -> Option<usize> {
        if self.muted {
            return None;
        }
        let clip = match self.resolve_effect(effect) {
            Ok(clip) => clip,
            Err(err) => {
                tracing::debug!(%effect, error = %err, "effect not played");
                return None;
            }
        };
        let channel = self.start_pooled(clip);
        self.emit(PlaybackEvent::EffectStarted {
            channel,
            effect: Some(effect),
        });
        Some(channel)
    }

    pub fn play_clip(&mut self, clip: Arc<SynthesizedClip>) -> Option<usize> {
        if self.muted {
            return None;
        }
        let channel = self.start_pooled(clip);
        self.emit(PlaybackEvent::EffectStarted {
            channel,
            effect: None,
        });
        Some(channel)
    }

    /// Plays a custom sound or catalog key; unknown keys are ignored.
    pub fn play_named(&mut self, key: &str) -> Option<usize> {
        if self.muted {
            return None;
        }
        match self.resolve_named(key) {
            Ok(clip) => {
                let effect = key.parse::<SoundEffect>().ok();
                let channel = self.start_pooled(clip);
                self.emit(PlaybackEvent::EffectStarted { channel, effect });
                Some(channel)
            }
            Err(err) => {
                tracing::debug!(key, error = %err, "named sound not played");
                None
            }
        }
    }

    fn start_pooled(&mut self, clip: Arc<SynthesizedClip>) -> usize {
        let gain = self.effective_sfx_gain();
        let channel = self.pool.play(clip, gain);
        tracing::debug!(channel, "pool channel assigned");
        channel
    }

    /// Fire-and-forget positional playback outside the pool. Ignores mute.
    ///
    /// Returns `false` when the source is out of earshot or has no clip.
    pub fn play_at(&mut self, effect: SoundEffect, position: Vec2) -> bool {
        let clip = match self.resolve_effect(effect) {
            Ok(clip) => clip,
            Err(err) => {
                tracing::debug!(%effect, error = %err, "spatial effect not played");
                return false;
            }
        };

        let (left, right) = spatial_gains(self.listener, position, self.spatial_max_distance);
        if left <= 0.0 && right <= 0.0 {
            return false;
        }

        if self.spatial.len() >= MAX_SPATIAL_VOICES {
            self.spatial.remove(0);
        }
        let gain = self.effective_sfx_gain();
        self.spatial.push(SpatialVoice {
            clip,
            cursor: 0,
            left_gain: left * gain,
            right_gain: right * gain,
        });
        self.emit(PlaybackEvent::SpatialStarted { effect, position });
        true
    }

    pub fn active_spatial_count(&self) -> usize {
        self.spatial.len()
    }

    pub fn assign_override(&mut self, effect: SoundEffect, clip: Arc<SynthesizedClip>) {
        self.overrides.insert(effect, clip);
    }

    pub fn clear_override(&mut self, effect: SoundEffect) -> Option<Arc<SynthesizedClip>> {
        self.overrides.remove(&effect)
    }

    pub fn register_sound(&mut self, name: impl Into<String>, recipe: SoundRecipe) {
        let name = name.into();
        // drop a stale render of the old recipe
        self.cache.remove(&format!("sound/{}", name));
        self.sounds.insert(name, recipe);
    }

    // Music

    pub fn register_music(&mut self, name: impl Into<String>, clip: Arc<SynthesizedClip>) {
        self.tracks.insert(name.into(), TrackSource::Clip(clip));
    }

    pub fn register_music_recipe(&mut self, name: impl Into<String>, recipe: SoundRecipe) {
        let name = name.into();
        self.cache.remove(&format!("music/{}", name));
        self.tracks.insert(name, TrackSource::Recipe(recipe));
    }

    /// Clip for a registered music track, rendering recipes on first use.
    pub fn resolve_music(&self, name: &str) -> Result<Arc<SynthesizedClip>> {
        match self.tracks.get(name) {
            Some(TrackSource::Clip(clip)) => Ok(Arc::clone(clip)),
            Some(TrackSource::Recipe(recipe)) => {
                let synth = self.synth;
                self.cache
                    .get_or_create(&format!("music/{}", name), || synth.render(recipe))
            }
            None => Err(Error::UnknownTrack(name.to_string())),
        }
    }

    /// Loops `track` on the music channel. Asking for the track that is
    /// already playing does nothing, so callers can request it every frame.
    /// A paused track is restarted.
    pub fn play_music(&mut self, track: &str) {
        if self.music_track.as_deref() == Some(track) && self.music.is_playing() {
            return;
        }

        let clip = match self.resolve_music(track) {
            Ok(clip) => clip,
            Err(err) => {
                tracing::warn!(track, error = %err, "music not started");
                return;
            }
        };

        if let Some(previous) = self.music_track.take() {
            self.emit(PlaybackEvent::MusicStopped(previous));
        }
        self.music.start(clip, true);
        self.music.set_gain(self.effective_music_gain());
        self.music_track = Some(track.to_string());

        tracing::info!(track, "music started");
        self.emit(PlaybackEvent::MusicStarted(track.to_string()));
    }

    pub fn stop_music(&mut self) {
        self.music.stop();
        if let Some(track) = self.music_track.take() {
            tracing::info!(track = %track, "music stopped");
            self.emit(PlaybackEvent::MusicStopped(track));
        }
    }

    pub fn pause_music(&mut self) {
        if self.music.is_playing() {
            self.music.set_paused(true);
            self.emit(PlaybackEvent::MusicPaused);
        }
    }

    pub fn resume_music(&mut self) {
        if self.music.is_paused() && self.music.clip().is_some() {
            self.music.set_paused(false);
            self.emit(PlaybackEvent::MusicResumed);
        }
    }

    pub fn current_music(&self) -> Option<&str> {
        self.music_track.as_deref()
    }

    pub fn is_music_paused(&self) -> bool {
        self.music.is_paused()
    }

    // Mixer state

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = clamp_volume(volume, self.master_volume);
        self.refresh_gains();
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume, self.music_volume);
        self.refresh_gains();
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume, self.sfx_volume);
        self.refresh_gains();
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn effective_sfx_gain(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn effective_music_gain(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    fn refresh_gains(&mut self) {
        self.pool.set_gain(self.effective_sfx_gain());
        self.music.set_gain(self.effective_music_gain());
    }

    /// Gates `play_effect`, `play_clip` and `play_named`. Music and
    /// `play_at` are unaffected.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_listener_position(&mut self, position: Vec2) {
        if position.is_finite() {
            self.listener = position;
        }
    }

    pub fn listener_position(&self) -> Vec2 {
        self.listener
    }

    pub fn apply_command(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::PlayEffect(effect) => {
                self.play_effect(effect);
            }
            AudioCommand::PlayNamed(key) => {
                self.play_named(&key);
            }
            AudioCommand::PlayClip(clip) => {
                self.play_clip(clip);
            }
            AudioCommand::PlayAt { effect, position } => {
                self.play_at(effect, position);
            }
            AudioCommand::PlayMusic(track) => self.play_music(&track),
            AudioCommand::StopMusic => self.stop_music(),
            AudioCommand::PauseMusic => self.pause_music(),
            AudioCommand::ResumeMusic => self.resume_music(),
            AudioCommand::SetMasterVolume(volume) => self.set_master_volume(volume),
            AudioCommand::SetMusicVolume(volume) => self.set_music_volume(volume),
            AudioCommand::SetSfxVolume(volume) => self.set_sfx_volume(volume),
            AudioCommand::SetMuted(muted) => self.set_muted(muted),
            AudioCommand::SetListenerPosition(position) => self.set_listener_position(position),
        }
    }

    /// Process audio into interleaved stereo buffer
    pub fn generate(&mut self, data: &mut [f32]) {
        for frame in data.chunks_mut(2) {
            let (left, right) = self.next_frame();
            frame[0] = left;
            if let Some(sample) = frame.get_mut(1) {
                *sample = right;
            }
        }
    }
}

impl StereoAudioGenerator for AudioServer {
    fn next_frame(&mut self) -> (f32, f32) {
        let center = self.pool.next_sample() + self.music.next_sample();
        let (mut left, mut right) = (center, center);

        for voice in &mut self.spatial {
            let (l, r) = voice.next_frame();
            left += l;
            right += r;
        }
        self.spatial.retain(|voice| !voice.is_finished());

        (sanitize_output(left), sanitize_output(right))
    }
}

/// Clamps into [0, 1]; a NaN keeps the previous value.
fn clamp_volume(volume: f32, current: f32) -> f32 {
    if volume.is_nan() {
        current
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PlaybackEventQueue;
    use approx::assert_abs_diff_eq;

    fn server() -> AudioServer {
        AudioServer::new(&AudioConfig::default())
    }

    fn constant_clip(len: usize, value: f32) -> Arc<SynthesizedClip> {
        Arc::new(SynthesizedClip::new(vec![value; len]))
    }

    #[test]
    fn test_door_locked_end_to_end() {
        let mut server = server();
        assert_eq!(server.play_effect(SoundEffect::DoorLocked), Some(0));
        let clip = server.pool().channel(0).unwrap().clip().unwrap();
        assert_eq!(clip.len(), 15435);
        assert!(server.cache().contains("door-locked"));
    }

    #[test]
    fn test_ninth_effect_reuses_first_channel() {
        let mut server = server();
        let channels: Vec<Option<usize>> = (0..9)
            .map(|_| server.play_effect(SoundEffect::MenuSelect))
            .collect();
        assert_eq!(channels[7], Some(7));
        assert_eq!(channels[8], Some(0));
    }

    #[test]
    fn test_override_wins_over_catalog() {
        let mut server = server();
        let custom = constant_clip(10, 0.1);
        server.assign_override(SoundEffect::Pickup, Arc::clone(&custom));
        let channel = server.play_effect(SoundEffect::Pickup).unwrap();
        assert!(Arc::ptr_eq(
            server.pool().channel(channel).unwrap().clip().unwrap(),
            &custom
        ));
        assert!(!server.cache().contains("pickup"));

        server.clear_override(SoundEffect::Pickup);
        let channel = server.play_effect(SoundEffect::Pickup).unwrap();
        assert!(!Arc::ptr_eq(
            server.pool().channel(channel).unwrap().clip().unwrap(),
            &custom
        ));
    }

    #[test]
    fn test_mute_blocks_pool_but_not_spatial() {
        let mut server = server();
        server.set_muted(true);
        assert_eq!(server.play_effect(SoundEffect::Attack), None);
        assert_eq!(server.play_clip(constant_clip(4, 0.5)), None);
        assert_eq!(server.play_named("attack"), None);
        assert_eq!(server.pool().active_count(), 0);

        assert!(server.play_at(SoundEffect::Attack, Vec2::new(2.0, 0.0)));
        assert_eq!(server.active_spatial_count(), 1);
    }

    #[test]
    fn test_spatial_pans_toward_source() {
        let mut server = server();
        server.assign_override(SoundEffect::EnemyHit, constant_clip(100, 0.5));
        assert!(server.play_at(SoundEffect::EnemyHit, Vec2::new(5.0, 0.0)));
        let (left, right) = server.next_frame();
        assert!(right > left, "left {} right {}", left, right);

        // out of earshot
        assert!(!server.play_at(SoundEffect::EnemyHit, Vec2::new(500.0, 0.0)));
    }

    #[test]
    fn test_spatial_voices_are_released() {
        let mut server = server();
        server.assign_override(SoundEffect::Pickup, constant_clip(3, 0.2));
        server.play_at(SoundEffect::Pickup, Vec2::ZERO);
        for _ in 0..3 {
            server.next_frame();
        }
        assert_eq!(server.active_spatial_count(), 0);
    }

    #[test]
    fn test_spatial_gains_centered_and_silent_at_range() {
        let (left, right) = spatial_gains(Vec2::ZERO, Vec2::ZERO, 20.0);
        assert_abs_diff_eq!(left, right, epsilon = 1e-6);
        assert_abs_diff_eq!(left, (PI / 4.0).cos(), epsilon = 1e-6);
        assert_eq!(spatial_gains(Vec2::ZERO, Vec2::new(0.0, 20.0), 20.0), (0.0, 0.0));
    }

    #[test]
    fn test_play_music_is_noop_for_current_track() {
        let queue = PlaybackEventQueue::new();
        let mut server = server();
        server.set_event_sender(queue.sender());
        server.register_music("crypt", constant_clip(1000, 0.1));

        server.play_music("crypt");
        for _ in 0..10 {
            server.next_frame();
        }
        server.play_music("crypt");

        assert_eq!(server.current_music(), Some("crypt"));
        assert_eq!(
            queue.receiver().drain(),
            vec![PlaybackEvent::MusicStarted("crypt".into())]
        );
    }

    #[test]
    fn test_play_music_restarts_paused_track() {
        let mut server = server();
        server.register_music("crypt", constant_clip(100, 0.5));
        server.set_music_volume(1.0);
        server.play_music("crypt");
        server.pause_music();
        assert_eq!(server.next_frame(), (0.0, 0.0));

        server.play_music("crypt");
        assert!(!server.is_music_paused());
        assert_eq!(server.current_music(), Some("crypt"));
        assert_abs_diff_eq!(server.next_frame().0, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_preload_all_fills_sounds_and_music() {
        let server = {
            let mut server = server();
            server.register_sound("bell", SoundRecipe::Noise { duration: 0.01 });
            server.register_music_recipe("drone", SoundRecipe::Noise { duration: 0.02 });
            server.register_music("crypt", constant_clip(10, 0.1));
            server
        };
        server.preload_all().unwrap();

        assert!(server.cache().contains("sound/bell"));
        assert!(server.cache().contains("music/drone"));
        assert!(server.cache().contains("door-locked"));
        assert_eq!(server.cache().len(), SoundEffect::ALL.len() + 2);
    }

    #[test]
    fn test_switching_music_stops_previous() {
        let queue = PlaybackEventQueue::new();
        let mut server = server();
        server.set_event_sender(queue.sender());
        server.register_music("crypt", constant_clip(10, 0.1));
        server.register_music("tower", constant_clip(10, 0.2));

        server.play_music("crypt");
        server.play_music("tower");
        assert_eq!(server.current_music(), Some("tower"));
        assert_eq!(
            queue.receiver().drain(),
            vec![
                PlaybackEvent::MusicStarted("crypt".into()),
                PlaybackEvent::MusicStopped("crypt".into()),
                PlaybackEvent::MusicStarted("tower".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_music_is_ignored() {
        let mut server = server();
        server.play_music("no-such-track");
        assert_eq!(server.current_music(), None);
    }

    #[test]
    fn test_music_recipe_renders_and_loops() {
        let mut server = server();
        server.register_music_recipe("drone", SoundRecipe::Noise { duration: 0.01 });
        server.play_music("drone");
        assert!(server.cache().contains("music/drone"));
        // longer than the clip, music keeps going
        for _ in 0..2000 {
            server.next_frame();
        }
        assert_eq!(server.current_music(), Some("drone"));
    }

    #[test]
    fn test_pause_and_resume_music() {
        let mut server = server();
        server.register_music("crypt", constant_clip(100, 0.5));
        server.set_music_volume(1.0);
        server.play_music("crypt");

        server.pause_music();
        assert!(server.is_music_paused());
        assert_eq!(server.next_frame(), (0.0, 0.0));

        server.resume_music();
        assert!(!server.is_music_paused());
        assert_abs_diff_eq!(server.next_frame().0, 0.5, epsilon = 1e-6);

        server.stop_music();
        assert_eq!(server.current_music(), None);
    }

    #[test]
    fn test_volumes_clamp_and_combine() {
        let mut server = server();
        server.set_master_volume(2.0);
        assert_eq!(server.master_volume(), 1.0);
        server.set_sfx_volume(-0.5);
        assert_eq!(server.sfx_volume(), 0.0);
        server.set_sfx_volume(f32::NAN);
        assert_eq!(server.sfx_volume(), 0.0);

        server.set_master_volume(0.5);
        server.set_sfx_volume(0.5);
        let channel = server.play_clip(constant_clip(10, 1.0)).unwrap();
        assert_abs_diff_eq!(server.pool().channel(channel).unwrap().gain(), 0.25);
    }

    #[test]
    fn test_generate_limits_output() {
        let mut server = server();
        for _ in 0..8 {
            server.play_clip(constant_clip(16, 1.0));
        }
        let mut buffer = [0.0f32; 8];
        server.generate(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_custom_named_sound() {
        let mut server = server();
        server.register_sound(
            "bell",
            SoundRecipe::Tone {
                frequency: 880.0,
                duration: 0.1,
                shape: crate::audio::WaveShape::Sine,
            },
        );
        assert_eq!(server.play_named("bell"), Some(0));
        assert_eq!(server.play_named("pickup"), Some(1));
        assert_eq!(server.play_named("unheard-of"), None);
    }

    #[test]
    fn test_commands_drive_server() {
        let mut server = server();
        server.register_music("crypt", constant_clip(10, 0.1));
        server.apply_command(AudioCommand::PlayMusic("crypt".into()));
        server.apply_command(AudioCommand::SetMuted(true));
        server.apply_command(AudioCommand::PlayEffect(SoundEffect::Attack));
        server.apply_command(AudioCommand::SetListenerPosition(Vec2::new(1.0, 2.0)));

        assert_eq!(server.current_music(), Some("crypt"));
        assert!(server.is_muted());
        assert_eq!(server.pool().active_count(), 0);
        assert_eq!(server.listener_position(), Vec2::new(1.0, 2.0));
    }
}
