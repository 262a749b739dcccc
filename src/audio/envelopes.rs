use crate::audio::{AudioGenerator, SAMPLE_RATE};

/// How envelope progress is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// `(index / sample_rate) / duration`
    Time { duration: f32 },
    /// `index / total_samples`
    Index { total_samples: usize },
}

/// Straight-line ramp from `start_level` to `end_level`.
///
/// Clip envelopes only ever decay, so there is no attack stage: the first
/// sample is emitted at `start_level`.
pub struct DecayEnvelope {
    start_level: f32,
    end_level: f32,
    progress: Progress,
    current_sample: usize,
}

impl DecayEnvelope {
    /// Full decay (1 -> 0) measured on elapsed time.
    pub fn over_time(duration: f32) -> Self {
        Self::new(1.0, 0.0, Progress::Time { duration })
    }

    /// Full decay (1 -> 0) measured on sample index.
    pub fn over_samples(total_samples: usize) -> Self {
        Self::new(1.0, 0.0, Progress::Index { total_samples })
    }

    pub fn new(start_level: f32, end_level: f32, progress: Progress) -> Self {
        Self {
            start_level,
            end_level: end_level.clamp(0.0, 1.0),
            progress,
            current_sample: 0,
        }
    }

    pub fn with_end_level(mut self, level: f32) -> Self {
        self.end_level = level.clamp(0.0, 1.0);
        self
    }

    /// Level at an arbitrary sample index, without advancing.
    pub fn level_at(&self, index: usize) -> f32 {
        let progress = match self.progress {
            Progress::Time { duration } if duration > 0.0 => {
                (index as f32 / SAMPLE_RATE as f32) / duration
            }
            Progress::Index { total_samples } if total_samples > 0 => {
                index as f32 / total_samples as f32
            }
            _ => 1.0,
        };
        let progress = progress.clamp(0.0, 1.0);
        self.start_level + (self.end_level - self.start_level) * progress
    }
}

impl AudioGenerator for DecayEnvelope {
    fn next_sample(&mut self) -> f32 {
        let level = self.level_at(self.current_sample);
        self.current_sample += 1;
        level
    }
}
