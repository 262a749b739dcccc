//! Pursuit and evasion steering.

use crate::ai::velocity::MAX_TARGET_SPEED;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunables shared by every agent. Per-archetype values live in
/// [`crate::ai::archetypes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// How far ahead the target's position is extrapolated, seconds
    pub look_ahead_seconds: f32,
    /// Evasion only rolls while the target is closer than this
    pub evasion_distance: f32,
    /// How long one evasion keeps its chosen side, seconds
    pub evasion_duration: f32,
    pub flock_radius: f32,
    pub separation_weight: f32,
    pub cohesion_weight: f32,
    pub max_target_speed: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            look_ahead_seconds: 0.5,
            evasion_distance: 3.0,
            evasion_duration: 0.25,
            flock_radius: 3.0,
            separation_weight: 1.5,
            cohesion_weight: 1.0,
            max_target_speed: MAX_TARGET_SPEED,
        }
    }
}

impl SteeringConfig {
    /// Clamps every field into a usable range.
    pub fn sanitized(mut self) -> Self {
        let non_negative = |v: f32, fallback: f32| if v.is_finite() { v.max(0.0) } else { fallback };
        let defaults = Self::default();
        self.look_ahead_seconds = non_negative(self.look_ahead_seconds, defaults.look_ahead_seconds);
        self.evasion_distance = non_negative(self.evasion_distance, defaults.evasion_distance);
        self.evasion_duration = non_negative(self.evasion_duration, defaults.evasion_duration);
        self.flock_radius = non_negative(self.flock_radius, defaults.flock_radius);
        self.separation_weight = non_negative(self.separation_weight, defaults.separation_weight);
        self.cohesion_weight = non_negative(self.cohesion_weight, defaults.cohesion_weight);
        self.max_target_speed = non_negative(self.max_target_speed, defaults.max_target_speed);
        self
    }
}

/// Where the target will be after `look_ahead` seconds, scaled by `strength`.
pub fn predict_position(current: Vec2, velocity: Vec2, look_ahead: f32, strength: f32) -> Vec2 {
    current + velocity * look_ahead * strength.clamp(0.0, 1.0)
}

/// Blends `base` toward the predicted target; `strength` 0 keeps `base`.
pub fn pursuit_direction(base: Vec2, position: Vec2, predicted: Vec2, strength: f32) -> Vec2 {
    let toward = (predicted - position).normalize_or_zero();
    base.lerp(toward, strength.clamp(0.0, 1.0)).normalize_or_zero()
}

/// `base` pushed sideways; `side` is +1 (left) or -1 (right).
pub fn evasion_direction(base: Vec2, side: f32) -> Vec2 {
    (base + base.perp() * side).normalize_or_zero()
}

/// Probabilistic dodge that holds its side for a short window.
#[derive(Debug, Clone, Default)]
pub struct Evasion {
    timer: f32,
    side: f32,
}

impl Evasion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_evading(&self) -> bool {
        self.timer > 0.0
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Returns the direction to use this tick.
    ///
    /// While the target is inside `config.evasion_distance` an evasion
    /// starts with probability `chance * dt * 2`.
    pub fn steer(
        &mut self,
        rng: &mut fastrand::Rng,
        base: Vec2,
        distance: f32,
        chance: f32,
        dt: f32,
        config: &SteeringConfig,
    ) -> Vec2 {
        if self.timer > 0.0 {
            self.timer -= dt;
            return evasion_direction(base, self.side);
        }

        if distance < config.evasion_distance && rng.f32() < chance.clamp(0.0, 1.0) * dt * 2.0 {
            self.side = if rng.bool() { 1.0 } else { -1.0 };
            self.timer = config.evasion_duration;
            tracing::trace!(side = self.side, distance, "evasion started");
            return evasion_direction(base, self.side);
        }

        base
    }
}
