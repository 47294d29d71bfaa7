pub mod breeding;
pub mod flee;
pub mod hunt;
pub mod metabolism;
pub mod population;
pub mod spatial;

use glam::Vec2;

use crate::config::SimConfig;
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::ecs::components::{Position, Species, Target, Vitals};
use crate::geometry::Bounds;
use crate::spatial::{AgentSnapshot, SpatialGrid};
use crate::stats::TraitTally;
use breeding::Nursery;

/// What happened during one tick, for the stats layer.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub predator_births: usize,
    pub prey_births: usize,
    pub predator_deaths: usize,
    pub prey_deaths: usize,
    pub predator_traits: TraitTally,
    pub prey_traits: TraitTally,
}

impl TickReport {
    pub fn births(&self, species: Species) -> usize {
        match species {
            Species::Predator => self.predator_births,
            Species::Prey => self.prey_births,
        }
    }

    pub fn deaths(&self, species: Species) -> usize {
        match species {
            Species::Predator => self.predator_deaths,
            Species::Prey => self.prey_deaths,
        }
    }
}

/// Scratch state reused across ticks.
pub struct TickBuffers {
    pub grid: SpatialGrid,
    pub snapshots: Vec<AgentSnapshot>,
    pub nursery: Nursery,
    pub neighbors: Vec<u32>,
}

impl TickBuffers {
    pub fn new(grid: SpatialGrid) -> Self {
        Self {
            grid,
            snapshots: Vec::with_capacity(256),
            nursery: Nursery::default(),
            neighbors: Vec::with_capacity(64),
        }
    }
}

/// Run every simulation phase for one fixed tick. Phases run in order and
/// each one sees the state left by the previous.
pub fn tick(
    world: &mut hecs::World,
    config: &SimConfig,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
    bufs: &mut TickBuffers,
    timers: &mut SystemTimers,
) -> TickReport {
    let mut report = TickReport::default();

    // 1. Rebuild spatial grid + snapshot cache
    timers.measure(SystemPhase::SpatialRebuild, || {
        spatial::rebuild(world, &mut bufs.grid, &mut bufs.snapshots)
    });

    // 2. Predators eat, fight, chase
    timers.measure(SystemPhase::Hunt, || {
        hunt::update(world, &bufs.snapshots, &bufs.grid, &mut bufs.neighbors, config.contact_distance)
    });

    // 3. Prey spot predators
    timers.measure(SystemPhase::Flee, || {
        flee::update(world, &bufs.snapshots, &bufs.grid, &mut bufs.neighbors)
    });

    // 4. Predator pairs mate
    timers.measure(SystemPhase::PredatorMating, || {
        breeding::predators(world, &bufs.snapshots, &bufs.grid, &mut bufs.neighbors, &mut bufs.nursery, config, bounds, rng)
    });

    // 5. Prey mate and count their crowd
    timers.measure(SystemPhase::PreyMating, || {
        breeding::prey(world, &bufs.snapshots, &bufs.grid, &mut bufs.neighbors, &mut bufs.nursery, config, bounds, rng)
    });

    // 6. Per-agent resources, motion, death
    timers.measure(SystemPhase::Metabolism, || {
        metabolism::update(world, config, bounds, rng, &mut report)
    });

    // 7. Drop the dead, spawn the newborn
    timers.measure(SystemPhase::Population, || {
        population::replace(world, &mut bufs.nursery, bounds, rng, &mut report)
    });

    report
}

/// Copy of an agent's vitals, if it still exists.
pub(crate) fn vitals_of(world: &hecs::World, entity: hecs::Entity) -> Option<Vitals> {
    world.get::<&Vitals>(entity).ok().map(|v| *v)
}

pub(crate) fn store_vitals(world: &hecs::World, entity: hecs::Entity, vitals: Vitals) {
    if let Ok(mut slot) = world.get::<&mut Vitals>(entity) {
        *slot = vitals;
    }
}

pub(crate) fn is_alive(world: &hecs::World, entity: hecs::Entity) -> bool {
    vitals_of(world, entity).is_some_and(|v| v.alive())
}

/// Where a behavior target currently is. `None` when the target agent has
/// been despawned or is already dead.
pub(crate) fn resolve_target(world: &hecs::World, target: Target) -> Option<Vec2> {
    match target {
        Target::Point(point) => Some(point),
        Target::Agent(entity) => {
            if !is_alive(world, entity) {
                return None;
            }
            world.get::<&Position>(entity).ok().map(|p| p.0)
        }
    }
}
