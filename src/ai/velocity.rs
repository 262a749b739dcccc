use glam::Vec2;

/// Ticks shorter than this (paused simulation) do not update the estimate.
pub const MIN_DT: f32 = 1e-4;
/// Upper bound on the estimated target speed, units per second.
pub const MAX_TARGET_SPEED: f32 = 50.0;

/// Replaces non-finite components with zero and caps the length.
pub fn sanitize_velocity(velocity: Vec2, max_speed: f32) -> Vec2 {
    if !velocity.is_finite() {
        return Vec2::ZERO;
    }
    velocity.clamp_length_max(max_speed)
}

/// Finite-difference estimate of a target's velocity from per-tick samples.
#[derive(Debug, Clone)]
pub struct TargetTracker {
    last_position: Option<Vec2>,
    velocity: Vec2,
    max_speed: f32,
}

impl TargetTracker {
    pub fn new(max_speed: f32) -> Self {
        Self {
            last_position: None,
            velocity: Vec2::ZERO,
            max_speed: max_speed.max(0.0),
        }
    }

    /// Feeds one position sample and returns the updated estimate.
    ///
    /// The first sample only seeds the history. Non-finite positions and
    /// samples with `dt <= MIN_DT` (or NaN) leave both the estimate and the
    /// history untouched. A difference that is not finite resets the
    /// estimate to zero.
    pub fn observe(&mut self, position: Vec2, dt: f32) -> Vec2 {
        if !position.is_finite() {
            return self.velocity;
        }

        let Some(last) = self.last_position else {
            self.last_position = Some(position);
            return self.velocity;
        };

        if dt.is_nan() || dt <= MIN_DT {
            return self.velocity;
        }

        self.velocity = sanitize_velocity((position - last) / dt, self.max_speed);
        self.last_position = Some(position);
        self.velocity
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    pub fn reset(&mut self) {
        self.last_position = None;
        self.velocity = Vec2::ZERO;
    }
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new(MAX_TARGET_SPEED)
    }
}
