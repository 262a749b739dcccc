use crate::audio::synth::SynthesizedClip;
use crate::audio::AudioGenerator;
use std::sync::Arc;

pub const DEFAULT_POOL_SIZE: usize = 8;

/// One playback voice: a shared clip and a read cursor.
#[derive(Default)]
pub struct PlaybackChannel {
    clip: Option<Arc<SynthesizedClip>>,
    cursor: usize,
    gain: f32,
    looping: bool,
    paused: bool,
}

impl PlaybackChannel {
    pub fn new() -> Self {
        Self {
            gain: 1.0,
            ..Default::default()
        }
    }

    /// Replaces whatever was playing and starts from the first sample.
    pub fn start(&mut self, clip: Arc<SynthesizedClip>, looping: bool) {
        self.clip = Some(clip);
        self.cursor = 0;
        self.looping = looping;
        self.paused = false;
    }

    pub fn stop(&mut self) {
        self.clip = None;
        self.cursor = 0;
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn clip(&self) -> Option<&Arc<SynthesizedClip>> {
        self.clip.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.clip.is_some() && !self.paused
    }
}

impl AudioGenerator for PlaybackChannel {
    fn next_sample(&mut self) -> f32 {
        if self.paused {
            return 0.0;
        }
        let Some(clip) = &self.clip else {
            return 0.0;
        };

        if self.cursor >= clip.len() {
            if self.looping && !clip.is_empty() {
                self.cursor = 0;
            } else {
                self.clip = None;
                return 0.0;
            }
        }

        let sample = clip.samples()[self.cursor] * self.gain;
        self.cursor += 1;
        sample
    }

    fn is_finished(&self) -> bool {
        self.clip.is_none()
    }
}

/// Fixed set of effect channels handed out round-robin.
///
/// Selection never checks whether a channel is still busy: the oldest
/// assignment is simply overwritten once the index wraps.
pub struct PlaybackPool {
    channels: Vec<PlaybackChannel>,
    next_index: usize,
}

impl PlaybackPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            channels: (0..size).map(|_| PlaybackChannel::new()).collect(),
            next_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Starts `clip` on the next channel and returns that channel's index.
    pub fn play(&mut self, clip: Arc<SynthesizedClip>, gain: f32) -> usize {
        let index = self.next_index;
        self.next_index = (self.next_index + 1) % self.channels.len();

        let channel = &mut self.channels[index];
        channel.set_gain(gain);
        channel.start(clip, false);
        index
    }

    pub fn channel(&self, index: usize) -> Option<&PlaybackChannel> {
        self.channels.get(index)
    }

    pub fn active_count(&self) -> usize {
        self.channels.iter().filter(|c| c.is_playing()).count()
    }

    /// Applies a new gain to every channel, including ones mid-clip.
    pub fn set_gain(&mut self, gain: f32) {
        for channel in &mut self.channels {
            channel.set_gain(gain);
        }
    }

    pub fn stop_all(&mut self) {
        for channel in &mut self.channels {
            channel.stop();
        }
    }
}

impl AudioGenerator for PlaybackPool {
    fn next_sample(&mut self) -> f32 {
        self.channels.iter_mut().map(|c| c.next_sample()).sum()
    }
}
