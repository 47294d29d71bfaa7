use thiserror::Error;

use crate::ecs::components::{Grazer, Hunter, Traits};

/// Stamina cost per unit of `weight * speed * dt`.
pub const ENERGY_FACTOR: f32 = 0.001;
/// Energy regenerated per unit of `food * dt` while resting.
pub const FOOD_TO_ENERGY_FACTOR: f32 = 0.05;
/// Food burned per second by every agent.
pub const FOOD_COST: f32 = 20.0;
/// Upper bound for energy and food.
pub const RESOURCE_MAX: f32 = 100.0;
/// Largest tile grid a world may allocate.
pub const MAX_TILES: usize = 1 << 20;

/// Errors raised when a configuration cannot drive a world.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world dimensions must be positive and finite (got {width}x{height})")]
    WorldSize { width: f32, height: f32 },
    #[error("tile size must be positive and finite (got {width}x{height})")]
    TileSize { width: f32, height: f32 },
    #[error("a {cols}x{rows} tile grid exceeds the limit of {} tiles", MAX_TILES)]
    TileCount { cols: f64, rows: f64 },
    #[error("timestep must be positive and finite (got {0})")]
    Timestep(f32),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// How a movement step turns into displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionScaling {
    /// Displacement is `step * step` along the bearing. Matches the reference
    /// model, where effective speed grows with the square of the step.
    #[default]
    Quadratic,
    /// Displacement is `step` along the bearing.
    Linear,
}

/// Population-level settings for predators.
#[derive(Debug, Clone, Copy)]
pub struct PredatorConfig {
    pub initial_count: usize,
    pub traits: Traits,
    pub hunter: Hunter,
    /// Lifespan of a newly spawned predator (seconds).
    pub life: f32,
    /// Cooldown a freshly spawned predator starts with.
    pub initial_mating_cooldown: f32,
    /// Both partners need more food than this to mate.
    pub mate_food: f32,
    pub mate_radius: f32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            initial_count: 30,
            traits: Traits {
                walk_speed: 40.0,
                run_speed: 100.0,
                weight: 40.0,
                alert_range: 75.0,
                mate_rate: 0.35,
                mate_gap: 2.0,
            },
            hunter: Hunter {
                quit_range: 125.0,
                eat_threshold: 65.0,
                rival_threshold: 30.0,
            },
            life: 60.0,
            initial_mating_cooldown: 2.0,
            mate_food: 70.0,
            mate_radius: 30.0,
        }
    }
}

/// Population-level settings for prey.
#[derive(Debug, Clone, Copy)]
pub struct PreyConfig {
    pub initial_count: usize,
    pub traits: Traits,
    pub grazer: Grazer,
    pub life: f32,
    pub initial_mating_cooldown: f32,
    pub mate_food: f32,
    pub mate_radius: f32,
    /// Same-species neighbors closer than this share the grazing.
    pub crowding_radius: f32,
    /// Food gained per second by a prey with no neighbors.
    pub graze_rate: f32,
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            initial_count: 150,
            traits: Traits {
                walk_speed: 40.0,
                run_speed: 60.0,
                weight: 40.0,
                alert_range: 50.0,
                mate_rate: 0.4,
                mate_gap: 1.5,
            },
            grazer: Grazer { safe_range: 80.0 },
            life: 40.0,
            initial_mating_cooldown: 1.5,
            mate_food: 50.0,
            mate_radius: 30.0,
            crowding_radius: 25.0,
            graze_rate: 40.0,
        }
    }
}

/// Everything needed to build and drive a [`crate::world::World`].
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// Seconds per tick.
    pub dt: f32,
    /// Population counts are sampled every this many ticks.
    pub sample_interval: u64,
    /// Number of population samples retained.
    pub history_capacity: usize,
    pub motion: MotionScaling,
    /// Prey closer than this get eaten, rivals closer than this get fought.
    pub contact_distance: f32,
    /// Pursuit ends and wander points are considered reached within this.
    pub arrive_distance: f32,
    /// Newborns land within this many units of the initiating parent.
    pub spawn_spread: f32,
    /// Relative half-width of the multiplicative trait mutation.
    pub mutation: f32,
    /// Resting pause after a successful mating. Zero disables it.
    pub mate_freeze: f32,
    pub predator: PredatorConfig,
    pub prey: PreyConfig,
    /// Seeds the world's generator. `None` draws a seed from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            tile_width: 20.0,
            tile_height: 20.0,
            dt: 1.0 / 60.0,
            sample_interval: 60,
            history_capacity: 3600,
            motion: MotionScaling::Quadratic,
            contact_distance: 5.0,
            arrive_distance: 1.0,
            spawn_spread: 100.0,
            mutation: 0.1,
            mate_freeze: 0.0,
            predator: PredatorConfig::default(),
            prey: PreyConfig::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(positive(self.width) && positive(self.height)) {
            return Err(ConfigError::WorldSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(positive(self.tile_width) && positive(self.tile_height)) {
            return Err(ConfigError::TileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        let cols = (self.width / self.tile_width).ceil() as f64;
        let rows = (self.height / self.tile_height).ceil() as f64;
        if cols * rows > MAX_TILES as f64 {
            return Err(ConfigError::TileCount { cols, rows });
        }
        if !positive(self.dt) {
            return Err(ConfigError::Timestep(self.dt));
        }
        if self.sample_interval == 0 {
            return Err(ConfigError::Invalid("sample_interval must be at least 1"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.mutation) {
            return Err(ConfigError::Invalid("mutation must be in [0, 1)"));
        }
        if self.spawn_spread < 0.0 || self.mate_freeze < 0.0 {
            return Err(ConfigError::Invalid(
                "spawn_spread and mate_freeze must not be negative",
            ));
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_world() {
        let config = SimConfig {
            width: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WorldSize { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_tiles() {
        let config = SimConfig {
            tile_height: -4.0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TileSize { .. })));
    }

    #[test]
    fn rejects_nan_timestep() {
        let config = SimConfig {
            dt: f32::NAN,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Timestep(_))));
    }

    #[test]
    fn rejects_zero_sample_interval() {
        let config = SimConfig {
            sample_interval: 0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_infinite_world() {
        let config = SimConfig {
            width: f32::INFINITY,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::WorldSize { .. })));
        assert!(crate::world::World::new(config).is_err());
    }

    #[test]
    fn rejects_grids_too_large_to_allocate() {
        let config = SimConfig {
            tile_width: f32::MIN_POSITIVE,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TileCount { .. })));

        let config = SimConfig {
            width: 1.0e9,
            height: 1.0e9,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TileCount { .. })));
    }

    #[test]
    fn rejects_infinite_tiles_and_timestep() {
        let config = SimConfig {
            tile_height: f32::INFINITY,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TileSize { .. })));

        let config = SimConfig {
            dt: f32::INFINITY,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Timestep(_))));
    }
}
