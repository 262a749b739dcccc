use crate::ai::steering::SteeringConfig;
use glam::Vec2;

/// Length of the combined flocking force, kept small so it only nudges
/// the base steering.
pub const FLOCK_INFLUENCE: f32 = 0.3;

/// Neighbors closer than this are treated as the agent itself.
const SELF_EPSILON: f32 = 1e-4;

/// Separation + cohesion from neighbors within `config.flock_radius`.
///
/// Separation sums unit vectors away from neighbors closer than half the
/// radius, each weighted by `1 / distance`. Cohesion points at the centroid
/// of every neighbor in range. The weighted sum is renormalized to
/// [`FLOCK_INFLUENCE`]; zero when there is nothing to react to.
pub fn flocking_force(position: Vec2, neighbors: &[Vec2], config: &SteeringConfig) -> Vec2 {
    let radius = config.flock_radius;
    let mut separation = Vec2::ZERO;
    let mut centroid = Vec2::ZERO;
    let mut count = 0usize;

    for &neighbor in neighbors {
        let offset = position - neighbor;
        let distance = offset.length();
        if distance < SELF_EPSILON || distance > radius {
            continue;
        }

        centroid += neighbor;
        count += 1;

        if distance < radius * 0.5 {
            separation += offset / distance / distance;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }

    let cohesion = centroid / count as f32 - position;
    let combined = separation * config.separation_weight + cohesion * config.cohesion_weight;
    combined.normalize_or_zero() * FLOCK_INFLUENCE
}
