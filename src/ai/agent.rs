use crate::ai::archetypes::{ArchetypeProfile, EnemyArchetype};
use crate::ai::flocking::flocking_force;
use crate::ai::patrol::PatrolState;
use crate::ai::steering::{predict_position, pursuit_direction, Evasion, SteeringConfig};
use crate::ai::velocity::TargetTracker;
use glam::Vec2;

/// Per-tick inputs for [`AiAgent::steer`].
#[derive(Debug, Clone, Copy)]
pub struct SteeringInput<'a> {
    pub position: Vec2,
    pub target: Vec2,
    /// Direction the movement code would use without AI adjustments
    pub base_direction: Vec2,
    /// Positions of nearby agents; only read when flocking is enabled
    pub neighbors: &'a [Vec2],
    pub dt: f32,
}

/// Steering state owned by one enemy.
pub struct AiAgent {
    archetype: EnemyArchetype,
    profile: ArchetypeProfile,
    config: SteeringConfig,
    tracker: TargetTracker,
    patrol: PatrolState,
    evasion: Evasion,
    rng: fastrand::Rng,
}

impl AiAgent {
    pub fn new(archetype: EnemyArchetype, home: Vec2, config: SteeringConfig) -> Self {
        Self::with_rng(archetype, home, config, fastrand::Rng::new())
    }

    pub fn with_seed(archetype: EnemyArchetype, home: Vec2, config: SteeringConfig, seed: u64) -> Self {
        Self::with_rng(archetype, home, config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(
        archetype: EnemyArchetype,
        home: Vec2,
        config: SteeringConfig,
        rng: fastrand::Rng,
    ) -> Self {
        let profile = *archetype.profile();
        let config = config.sanitized();
        Self {
            archetype,
            profile,
            tracker: TargetTracker::new(config.max_target_speed),
            patrol: PatrolState::new(
                profile.patrol_pattern,
                home,
                profile.wander_radius,
                profile.patrol_angular_speed,
            ),
            evasion: Evasion::new(),
            config,
            rng,
        }
    }

    /// Replaces the table profile, e.g. for a boss variant. Call before the first tick.
    pub fn with_profile(mut self, profile: ArchetypeProfile) -> Self {
        self.patrol = PatrolState::new(
            profile.patrol_pattern,
            self.patrol.center(),
            profile.wander_radius,
            profile.patrol_angular_speed,
        );
        self.profile = profile;
        self
    }

    pub fn archetype(&self) -> EnemyArchetype {
        self.archetype
    }

    pub fn profile(&self) -> &ArchetypeProfile {
        &self.profile
    }

    /// Updates the velocity estimate from this tick's target sample.
    pub fn observe_target(&mut self, target: Vec2, dt: f32) -> Vec2 {
        self.tracker.observe(target, dt)
    }

    pub fn estimated_velocity(&self) -> Vec2 {
        self.tracker.velocity()
    }

    pub fn predicted_target(&self, target: Vec2) -> Vec2 {
        predict_position(
            target,
            self.tracker.velocity(),
            self.config.look_ahead_seconds,
            self.profile.prediction_strength,
        )
    }

    /// Full chase step: velocity update, pursuit, evasion and flocking.
    /// Returns a unit direction, or zero when there is nowhere to go.
    pub fn steer(&mut self, input: SteeringInput<'_>) -> Vec2 {
        self.observe_target(input.target, input.dt);

        let predicted = self.predicted_target(input.target);
        let mut direction = pursuit_direction(
            input.base_direction,
            input.position,
            predicted,
            self.profile.prediction_strength,
        );

        if self.profile.can_evade {
            direction = self.evasion.steer(
                &mut self.rng,
                direction,
                input.position.distance(input.target),
                self.profile.evasion_chance,
                input.dt,
                &self.config,
            );
        }

        if self.profile.flocking_enabled {
            let force = flocking_force(input.position, input.neighbors, &self.config);
            if force != Vec2::ZERO {
                direction = (direction + force).normalize_or_zero();
            }
        }

        direction
    }

    pub fn is_evading(&self) -> bool {
        self.evasion.is_evading()
    }

    /// Advances the patrol pattern and returns where to walk.
    pub fn update_patrol(&mut self, position: Vec2, dt: f32) -> Vec2 {
        self.patrol.update(position, dt, &mut self.rng)
    }

    pub fn patrol_target(&self) -> Vec2 {
        self.patrol.target()
    }

    pub fn patrol(&self) -> &PatrolState {
        &self.patrol
    }
}
