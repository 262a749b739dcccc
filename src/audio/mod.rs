pub mod cache;
pub mod catalog;
pub mod envelopes;
pub mod export;
pub mod oscillators;
pub mod pool;
pub mod server;
pub mod synth;

pub use cache::ClipCache;
pub use catalog::{SoundEffect, SoundRecipe};
pub use oscillators::WaveShape;
pub use pool::PlaybackPool;
pub use server::AudioServer;
pub use synth::{ClipSynthesizer, SynthesizedClip};

pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = 2.0 * PI;

/// Every clip is mono at this rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Number of samples covering `seconds` at the fixed sample rate, rounded to nearest.
pub fn sec_to_samples(seconds: f32) -> usize {
    (seconds as f64 * SAMPLE_RATE as f64).round().max(0.0) as usize
}

// Basic trait for audio generators that produce a single sample output
pub trait AudioGenerator {
    fn next_sample(&mut self) -> f32;
    fn is_finished(&self) -> bool {
        false
    }
}

pub trait StereoAudioGenerator {
    fn next_frame(&mut self) -> (f32, f32);
}
