//! Patrol-pattern state machines.
//!
//! No pattern has a terminal state; an agent patrols until it is dropped.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Distance at which a Linear/Figure8 waypoint counts as reached.
pub const WAYPOINT_TOLERANCE: f32 = 0.3;
/// Seconds a Random patroller holds before picking a new point.
pub const RANDOM_HOLD_SECS: f32 = 2.0;
/// Seconds a Sentry holds at each post.
pub const SENTRY_HOLD_SECS: f32 = 3.0;

const FIGURE8_POINTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatrolPattern {
    Linear,
    Circular,
    Figure8,
    Random,
    Sentry,
}

/// Fixed cyclic waypoint list for the waypoint-driven patterns.
pub fn waypoints(pattern: PatrolPattern, center: Vec2, radius: f32) -> Vec<Vec2> {
    match pattern {
        PatrolPattern::Linear => vec![center - Vec2::X * radius, center + Vec2::X * radius],
        // lemniscate of Gerono
        PatrolPattern::Figure8 => (0..FIGURE8_POINTS)
            .map(|i| {
                let theta = i as f32 * TAU / FIGURE8_POINTS as f32;
                center + Vec2::new(theta.sin(), theta.sin() * theta.cos()) * radius
            })
            .collect(),
        PatrolPattern::Sentry => vec![
            center,
            center + Vec2::X * radius,
            center + Vec2::Y * radius,
            center - Vec2::X * radius,
            center - Vec2::Y * radius,
        ],
        PatrolPattern::Circular | PatrolPattern::Random => vec![center],
    }
}

#[derive(Debug, Clone)]
pub struct PatrolState {
    pattern: PatrolPattern,
    center: Vec2,
    radius: f32,
    angular_speed: f32,
    waypoints: Vec<Vec2>,
    index: usize,
    timer: f32,
    angle: f32,
    target: Vec2,
}

impl PatrolState {
    pub fn new(pattern: PatrolPattern, center: Vec2, radius: f32, angular_speed: f32) -> Self {
        let radius = radius.max(0.0);
        let waypoints = waypoints(pattern, center, radius);
        let target = match pattern {
            PatrolPattern::Circular => center + Vec2::X * radius,
            _ => waypoints[0],
        };
        Self {
            pattern,
            center,
            radius,
            angular_speed,
            waypoints,
            index: 0,
            timer: 0.0,
            angle: 0.0,
            target,
        }
    }

    pub fn pattern(&self) -> PatrolPattern {
        self.pattern
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Advances the pattern by one tick and returns the current patrol target.
    ///
    /// Timed patterns reset their timer to zero on advance, so a long tick
    /// moves at most one step.
    pub fn update(&mut self, position: Vec2, dt: f32, rng: &mut fastrand::Rng) -> Vec2 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.pattern {
            PatrolPattern::Linear | PatrolPattern::Figure8 => {
                if position.distance(self.target) < WAYPOINT_TOLERANCE {
                    self.advance_waypoint();
                }
            }
            PatrolPattern::Circular => {
                self.angle = (self.angle + self.angular_speed * dt).rem_euclid(TAU);
                self.target = self.center + Vec2::from_angle(self.angle) * self.radius;
            }
            PatrolPattern::Random => {
                self.timer += dt;
                if self.timer >= RANDOM_HOLD_SECS {
                    self.timer = 0.0;
                    self.target = self.center + random_in_disk(rng) * self.radius;
                }
            }
            PatrolPattern::Sentry => {
                self.timer += dt;
                if self.timer >= SENTRY_HOLD_SECS {
                    self.timer = 0.0;
                    self.advance_waypoint();
                }
            }
        }

        self.target
    }

    fn advance_waypoint(&mut self) {
        self.index = (self.index + 1) % self.waypoints.len();
        self.target = self.waypoints[self.index];
    }
}

/// Uniform point in the unit disk.
fn random_in_disk(rng: &mut fastrand::Rng) -> Vec2 {
    let angle = rng.f32() * TAU;
    Vec2::from_angle(angle) * rng.f32().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sentry_advances_once_per_hold() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut patrol = PatrolState::new(PatrolPattern::Sentry, Vec2::ZERO, 2.0, 1.0);
        assert_eq!(patrol.index(), 0);

        patrol.update(Vec2::ZERO, 1.0, &mut rng);
        patrol.update(Vec2::ZERO, 1.0, &mut rng);
        assert_eq!(patrol.index(), 0);
        patrol.update(Vec2::ZERO, 1.0, &mut rng);
        assert_eq!(patrol.index(), 1);
        assert_eq!(patrol.target(), Vec2::new(2.0, 0.0));

        // a single oversized tick still advances only one post
        let mut patrol = PatrolState::new(PatrolPattern::Sentry, Vec2::ZERO, 2.0, 1.0);
        patrol.update(Vec2::ZERO, 10.0, &mut rng);
        assert_eq!(patrol.index(), 1);
        assert_eq!(patrol.timer(), 0.0);
    }

    #[test]
    fn test_sentry_cycles_through_cross() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut patrol = PatrolState::new(PatrolPattern::Sentry, Vec2::new(1.0, 1.0), 1.0, 1.0);
        let mut visited = vec![patrol.target()];
        for _ in 0..5 {
            visited.push(patrol.update(Vec2::ZERO, SENTRY_HOLD_SECS, &mut rng));
        }
        assert_eq!(
            visited,
            vec![
                Vec2::new(1.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(1.0, 2.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_linear_advances_only_when_close() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut patrol = PatrolState::new(PatrolPattern::Linear, Vec2::ZERO, 4.0, 1.0);
        assert_eq!(patrol.target(), Vec2::new(-4.0, 0.0));

        patrol.update(Vec2::new(0.0, 0.0), 0.1, &mut rng);
        assert_eq!(patrol.index(), 0);

        let target = patrol.update(Vec2::new(-3.8, 0.0), 0.1, &mut rng);
        assert_eq!(patrol.index(), 1);
        assert_eq!(target, Vec2::new(4.0, 0.0));

        patrol.update(Vec2::new(3.9, 0.1), 0.1, &mut rng);
        assert_eq!(patrol.index(), 0);
    }

    #[test]
    fn test_figure8_waypoints_cross_center() {
        let points = waypoints(PatrolPattern::Figure8, Vec2::ZERO, 2.0);
        assert_eq!(points.len(), FIGURE8_POINTS);
        assert!(points[0].length() < 1e-6);
        assert!(points[4].length() < 1e-5);
        assert_abs_diff_eq!(points[2].x, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(points[6].x, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_circular_stays_on_radius() {
        let mut rng = fastrand::Rng::with_seed(1);
        let center = Vec2::new(5.0, -2.0);
        let mut patrol = PatrolState::new(PatrolPattern::Circular, center, 3.0, 1.5);
        let first = patrol.target();
        for _ in 0..100 {
            let target = patrol.update(Vec2::ZERO, 0.05, &mut rng);
            assert_abs_diff_eq!(target.distance(center), 3.0, epsilon = 1e-4);
        }
        assert_ne!(first, patrol.target());
    }

    #[test]
    fn test_random_holds_then_jumps_within_radius() {
        let mut rng = fastrand::Rng::with_seed(9);
        let center = Vec2::new(10.0, 10.0);
        let mut patrol = PatrolState::new(PatrolPattern::Random, center, 2.5, 1.0);

        assert_eq!(patrol.update(center, 1.9, &mut rng), center);
        for _ in 0..20 {
            let target = patrol.update(center, RANDOM_HOLD_SECS, &mut rng);
            assert!(target.distance(center) <= 2.5 + 1e-5);
        }
    }
}
