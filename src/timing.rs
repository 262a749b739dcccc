/// Simulation time plus wall time.
///
/// Gameplay (AI, patrols) runs on scaled time, which stops while paused.
/// Visual effects run on unscaled time so they finish during a pause.
#[derive(Debug, Clone, PartialEq)]
pub struct GameClock {
    scaled_time: f64,
    unscaled_time: f64,
    time_scale: f32,
    paused: bool,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            scaled_time: 0.0,
            unscaled_time: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Advances both clocks by a real frame delta and returns the scaled delta.
    pub fn advance(&mut self, real_dt: f32) -> f32 {
        let real_dt = if real_dt.is_finite() { real_dt.max(0.0) } else { 0.0 };
        self.unscaled_time += real_dt as f64;

        if self.paused {
            return 0.0;
        }
        let scaled_dt = real_dt * self.time_scale;
        self.scaled_time += scaled_dt as f64;
        scaled_dt
    }

    pub fn scaled_time(&self) -> f64 {
        self.scaled_time
    }

    pub fn unscaled_time(&self) -> f64 {
        self.unscaled_time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Negative or non-finite scales are ignored.
    pub fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_advance_scales_time() {
        let mut clock = GameClock::new();
        clock.set_time_scale(0.5);
        let dt = clock.advance(0.1);
        assert_abs_diff_eq!(dt, 0.05);
        assert_abs_diff_eq!(clock.scaled_time(), 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(clock.unscaled_time(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_pause_freezes_scaled_time_only() {
        let mut clock = GameClock::new();
        clock.advance(1.0);
        clock.pause();
        assert_eq!(clock.advance(0.5), 0.0);
        assert_abs_diff_eq!(clock.scaled_time(), 1.0);
        assert_abs_diff_eq!(clock.unscaled_time(), 1.5);

        clock.resume();
        assert_eq!(clock.advance(0.5), 0.5);
    }

    #[test]
    fn test_bad_deltas_are_zero() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
        assert_eq!(clock.unscaled_time(), 0.0);

        clock.set_time_scale(-2.0);
        assert_eq!(clock.time_scale(), 1.0);
    }
}
