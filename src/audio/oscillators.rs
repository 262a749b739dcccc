use crate::audio::{AudioGenerator, SAMPLE_RATE, TWO_PI};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaveShape {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    Noise,
}

/// Amplitude of `shape` at time `t` (seconds) for `frequency` (Hz).
///
/// Pure for every shape except [`WaveShape::Noise`], which draws a fresh
/// uniform value on each call and ignores `t`.
pub fn sample(t: f32, frequency: f32, shape: WaveShape) -> f32 {
    sample_phase(frequency * t, shape)
}

/// Same as [`sample`] but driven by an accumulated phase measured in cycles.
pub fn sample_phase(cycles: f32, shape: WaveShape) -> f32 {
    match shape {
        WaveShape::Sine => (TWO_PI * cycles).sin(),
        // exact zero crossings land on -1
        WaveShape::Square => {
            if (TWO_PI * cycles).sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        WaveShape::Triangle => ping_pong(4.0 * cycles, 2.0) - 1.0,
        WaveShape::Sawtooth => cycles.rem_euclid(1.0) * 2.0 - 1.0,
        WaveShape::Noise => fastrand::f32() * 2.0 - 1.0,
    }
}

/// Bounces `x` between 0 and `length`.
fn ping_pong(x: f32, length: f32) -> f32 {
    let wrapped = x.rem_euclid(length * 2.0);
    length - (wrapped - length).abs()
}

/// Phase accumulator for oscillators whose frequency changes per sample.
pub struct PhaseGenerator {
    phase: f32,
    phase_increment: f32,
    sample_rate: f32,
}

impl PhaseGenerator {
    pub fn new(frequency: f32) -> Self {
        let sample_rate = SAMPLE_RATE as f32;
        Self {
            phase: 0.0,
            sample_rate,
            phase_increment: frequency / sample_rate,
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.phase_increment = frequency / self.sample_rate;
    }

    pub fn next_sample(&mut self) -> f32 {
        let sample = self.phase;
        self.phase += self.phase_increment;

        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}

/// Oscillator for a fixed or swept frequency with any [`WaveShape`].
pub struct ShapeOscillator {
    phase_gen: PhaseGenerator,
    shape: WaveShape,
}

impl ShapeOscillator {
    pub fn new(frequency: f32, shape: WaveShape) -> Self {
        Self {
            phase_gen: PhaseGenerator::new(frequency),
            shape,
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.phase_gen.set_frequency(frequency);
    }
}

impl AudioGenerator for ShapeOscillator {
    fn next_sample(&mut self) -> f32 {
        let phase = self.phase_gen.next_sample();
        sample_phase(phase, self.shape)
    }
}

pub struct NoiseGenerator {
    rng: fastrand::Rng,
}

impl NoiseGenerator {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioGenerator for NoiseGenerator {
    fn next_sample(&mut self) -> f32 {
        self.rng.f32() * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PERIODIC: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Square,
        WaveShape::Triangle,
        WaveShape::Sawtooth,
    ];

    #[test]
    fn test_periodic_shapes_are_deterministic() {
        for shape in PERIODIC {
            for i in 0..500 {
                let t = i as f32 * 0.00123;
                let a = sample(t, 440.0, shape);
                let b = sample(t, 440.0, shape);
                assert_eq!(a.to_bits(), b.to_bits(), "{:?} differs at t={}", shape, t);
                assert!((-1.0..=1.0).contains(&a), "{:?} out of range: {}", shape, a);
            }
        }
    }

    #[test]
    fn test_noise_stays_in_range() {
        for _ in 0..10_000 {
            let s = sample(0.0, 0.0, WaveShape::Noise);
            assert!((-1.0..=1.0).contains(&s), "noise out of range: {}", s);
        }
    }

    #[test]
    fn test_square_zero_crossing_is_negative() {
        assert_eq!(sample(0.0, 100.0, WaveShape::Square), -1.0);
        // a quarter period in is the positive peak
        assert_eq!(sample(0.0025, 100.0, WaveShape::Square), 1.0);
    }

    #[test]
    fn test_sine_quarter_period_peak() {
        assert_abs_diff_eq!(sample(0.0025, 100.0, WaveShape::Sine), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_triangle_ramps_through_one_period() {
        // 1 Hz so t maps straight to cycles
        assert_abs_diff_eq!(sample(0.0, 1.0, WaveShape::Triangle), -1.0);
        assert_abs_diff_eq!(sample(0.25, 1.0, WaveShape::Triangle), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sample(0.5, 1.0, WaveShape::Triangle), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sample(0.75, 1.0, WaveShape::Triangle), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sawtooth_wraps_each_cycle() {
        assert_abs_diff_eq!(sample(0.0, 2.0, WaveShape::Sawtooth), -1.0);
        assert_abs_diff_eq!(sample(0.25, 2.0, WaveShape::Sawtooth), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sample(0.5, 2.0, WaveShape::Sawtooth), -1.0, epsilon = 1e-6);
        assert!(sample(-0.1, 2.0, WaveShape::Sawtooth) >= -1.0);
    }

    #[test]
    fn test_shape_oscillator_matches_sample_function() {
        let mut osc = ShapeOscillator::new(441.0, WaveShape::Sawtooth);
        // 441 Hz at 44.1 kHz is exactly 100 samples per cycle
        for i in 0..100 {
            let expected = sample(i as f32 / SAMPLE_RATE as f32, 441.0, WaveShape::Sawtooth);
            assert_abs_diff_eq!(osc.next_sample(), expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_seeded_noise_generator_repeats() {
        let mut a = NoiseGenerator::with_seed(7);
        let mut b = NoiseGenerator::with_seed(7);
        for _ in 0..64 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }
}
