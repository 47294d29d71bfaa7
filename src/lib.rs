//! Predator/prey simulation on a wrapping 2D field.
//!
//! Predators hunt, fight and breed; prey graze, flee and breed. Children
//! inherit mutated traits from both parents, so populations drift over time.

pub mod agent;
pub mod app;
pub mod config;
pub mod debug;
pub mod ecs;
pub mod geometry;
pub mod spatial;
pub mod stats;
pub mod util;
pub mod world;

pub use config::{ConfigError, MotionScaling, SimConfig};
pub use ecs::components::{BehaviorState, Species};
pub use stats::{AgentView, PopulationHistory, PopulationSample, StatsSummary};
pub use world::World;
