//! WAV export of synthesized clips.

use crate::audio::synth::SynthesizedClip;
use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Converts samples in [-1, 1] to 16-bit PCM. Out-of-range and NaN input is
/// clamped (NaN becomes 0).
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let s = if s.is_nan() { 0.0 } else { s.clamp(-1.0, 1.0) };
            (s * i16::MAX as f32) as i16
        })
        .collect()
}

/// Writes a 16-bit mono WAV file at the clip's sample rate.
pub fn write_wav(clip: &SynthesizedClip, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for sample in to_pcm_i16(clip.samples()) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    tracing::debug!(path = %path.display(), samples = clip.len(), "wrote wav");
    Ok(())
}
