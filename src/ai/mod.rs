//! Enemy steering: target prediction, evasion, flocking and patrols.

pub mod agent;
pub mod archetypes;
pub mod flocking;
pub mod patrol;
pub mod steering;
pub mod velocity;

pub use agent::{AiAgent, SteeringInput};
pub use archetypes::{ArchetypeProfile, EnemyArchetype};
pub use patrol::{PatrolPattern, PatrolState};
pub use steering::SteeringConfig;
pub use velocity::TargetTracker;
