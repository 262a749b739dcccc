//! Procedural clip synthesis.
//!
//! Every clip is a mono buffer at [`SAMPLE_RATE`] whose length is
//! `round(SAMPLE_RATE * duration)`. Periodic generators scale by 0.5, noise
//! by 0.3.

use crate::audio::catalog::SoundRecipe;
use crate::audio::envelopes::DecayEnvelope;
use crate::audio::oscillators::{self, NoiseGenerator, ShapeOscillator, WaveShape};
use crate::audio::{sec_to_samples, AudioGenerator, SAMPLE_RATE};
use crate::error::{Error, Result};

const TONE_AMPLITUDE: f32 = 0.5;
const NOISE_AMPLITUDE: f32 = 0.3;
/// Sequence segments decay only to half level.
const SEQUENCE_END_LEVEL: f32 = 0.5;
/// Longest clip, in seconds, a recipe may describe.
pub const MAX_CLIP_SECONDS: f32 = 60.0;

/// Immutable synthesized sample buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SynthesizedClip {
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: SAMPLE_RATE,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Instantaneous frequency of a linear sweep at time `t`.
pub fn sweep_frequency_at(start_frequency: f32, end_frequency: f32, duration: f32, t: f32) -> f32 {
    if duration <= 0.0 {
        return end_frequency;
    }
    let progress = (t / duration).clamp(0.0, 1.0);
    start_frequency + (end_frequency - start_frequency) * progress
}

fn check_duration(duration: f32) -> Result<()> {
    if duration.is_finite() && duration > 0.0 && duration <= MAX_CLIP_SECONDS {
        Ok(())
    } else {
        Err(Error::InvalidRecipe(format!(
            "duration must be in (0, {}] seconds, got {}",
            MAX_CLIP_SECONDS, duration
        )))
    }
}

fn check_frequency(frequency: f32) -> Result<()> {
    if frequency.is_finite() && frequency >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRecipe(format!(
            "frequency must be non-negative, got {}",
            frequency
        )))
    }
}

/// Checks every frequency and duration of `recipe` without rendering it.
pub fn validate_recipe(recipe: &SoundRecipe) -> Result<()> {
    match recipe {
        SoundRecipe::Tone {
            frequency,
            duration,
            ..
        } => {
            check_frequency(*frequency)?;
            check_duration(*duration)
        }
        SoundRecipe::Sequence { notes, .. } => {
            let frequencies: Vec<f32> = notes.iter().map(|&(f, _)| f).collect();
            let durations: Vec<f32> = notes.iter().map(|&(_, d)| d).collect();
            check_sequence(&frequencies, &durations).map(|_| ())
        }
        SoundRecipe::Sweep {
            start_frequency,
            end_frequency,
            duration,
            ..
        } => {
            check_frequency(*start_frequency)?;
            check_frequency(*end_frequency)?;
            check_duration(*duration)
        }
        SoundRecipe::Noise { duration } => check_duration(*duration),
    }
}

/// Validates every segment and returns the summed sample count.
fn check_sequence(frequencies: &[f32], durations: &[f32]) -> Result<usize> {
    if frequencies.is_empty() {
        return Err(Error::InvalidRecipe("tone sequence is empty".into()));
    }
    if frequencies.len() != durations.len() {
        return Err(Error::InvalidRecipe(format!(
            "{} frequencies but {} durations",
            frequencies.len(),
            durations.len()
        )));
    }
    for (&frequency, &duration) in frequencies.iter().zip(durations) {
        check_frequency(frequency)?;
        check_duration(duration)?;
    }

    let total = durations
        .iter()
        .try_fold(0usize, |sum, &d| sum.checked_add(sec_to_samples(d)))
        .filter(|&total| total <= sec_to_samples(MAX_CLIP_SECONDS))
        .ok_or_else(|| {
            Error::InvalidRecipe(format!(
                "tone sequence is longer than {} seconds",
                MAX_CLIP_SECONDS
            ))
        })?;
    Ok(total)
}

/// Builds clips from tones, tone sequences, sweeps and noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipSynthesizer;

impl ClipSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Dispatches a recipe to the matching generator.
    pub fn render(&self, recipe: &SoundRecipe) -> Result<SynthesizedClip> {
        match recipe {
            SoundRecipe::Tone {
                frequency,
                duration,
                shape,
            } => self.tone(*frequency, *duration, *shape),
            SoundRecipe::Sequence { notes, shape } => {
                let (frequencies, durations): (Vec<f32>, Vec<f32>) = notes.iter().copied().unzip();
                self.tone_sequence(&frequencies, &durations, *shape)
            }
            SoundRecipe::Sweep {
                start_frequency,
                end_frequency,
                duration,
                shape,
            } => self.sweep(*start_frequency, *end_frequency, *duration, *shape),
            SoundRecipe::Noise { duration } => self.noise(*duration),
        }
    }

    /// Single tone with a full linear decay.
    pub fn tone(&self, frequency: f32, duration: f32, shape: WaveShape) -> Result<SynthesizedClip> {
        check_frequency(frequency)?;
        check_duration(duration)?;

        let total = sec_to_samples(duration);
        let envelope = DecayEnvelope::over_time(duration);
        let samples = (0..total)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                oscillators::sample(t, frequency, shape) * envelope.level_at(i) * TONE_AMPLITUDE
            })
            .collect();

        Ok(SynthesizedClip::new(samples))
    }

    /// Consecutive tones laid end to end; each segment decays from 1.0 to 0.5.
    pub fn tone_sequence(
        &self,
        frequencies: &[f32],
        durations: &[f32],
        shape: WaveShape,
    ) -> Result<SynthesizedClip> {
        let total = check_sequence(frequencies, durations)?;
        let mut samples = Vec::with_capacity(total);

        for (&frequency, &duration) in frequencies.iter().zip(durations) {
            let segment = sec_to_samples(duration);
            let envelope = DecayEnvelope::over_time(duration).with_end_level(SEQUENCE_END_LEVEL);
            samples.extend((0..segment).map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                oscillators::sample(t, frequency, shape) * envelope.level_at(i) * TONE_AMPLITUDE
            }));
        }

        Ok(SynthesizedClip::new(samples))
    }

    /// Linear frequency glide with a full decay.
    pub fn sweep(
        &self,
        start_frequency: f32,
        end_frequency: f32,
        duration: f32,
        shape: WaveShape,
    ) -> Result<SynthesizedClip> {
        check_frequency(start_frequency)?;
        check_frequency(end_frequency)?;
        check_duration(duration)?;

        let total = sec_to_samples(duration);
        let mut oscillator = ShapeOscillator::new(start_frequency, shape);
        let mut envelope = DecayEnvelope::over_time(duration);
        let mut samples = Vec::with_capacity(total);

        for i in 0..total {
            let t = i as f32 / SAMPLE_RATE as f32;
            oscillator.set_frequency(sweep_frequency_at(start_frequency, end_frequency, duration, t));
            samples.push(oscillator.next_sample() * envelope.next_sample() * TONE_AMPLITUDE);
        }

        Ok(SynthesizedClip::new(samples))
    }

    /// White noise burst. The envelope runs on sample index, not time.
    pub fn noise(&self, duration: f32) -> Result<SynthesizedClip> {
        check_duration(duration)?;

        let total = sec_to_samples(duration);
        let mut generator = NoiseGenerator::new();
        let mut envelope = DecayEnvelope::over_samples(total);
        let samples = (0..total)
            .map(|_| generator.next_sample() * envelope.next_sample() * NOISE_AMPLITUDE)
            .collect();

        Ok(SynthesizedClip::new(samples))
    }
}
