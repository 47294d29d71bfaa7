use glam::Vec2;

use crate::agent;
use crate::config::{ConfigError, SimConfig};
use crate::debug::timer::SystemTimers;
use crate::ecs::components::{
    Behavior, Grazer, Hunter, Position, Species, Traits, Vitals,
};
use crate::ecs::systems::{self, TickBuffers, TickReport};
use crate::geometry::Bounds;
use crate::spatial::SpatialGrid;
use crate::stats::{AgentView, PopulationHistory, PopulationSample, SpeciesSummary, StatsSummary};

/// The simulation: both populations, the clock, and everything derived
/// from them. Ticks run one at a time through `&mut self`.
pub struct World {
    config: SimConfig,
    bounds: Bounds,

    // ECS
    ecs: hecs::World,

    // Grid, snapshot cache and nursery (reused each tick)
    bufs: TickBuffers,

    // RNG (single source for every random draw)
    rng: fastrand::Rng,

    tick: u64,
    predator_births: u64,
    prey_births: u64,
    predator_deaths: u64,
    prey_deaths: u64,
    summary: StatsSummary,
    history: PopulationHistory,
    timers: SystemTimers,
}

impl World {
    /// Build an empty world. The generator is seeded from `config.seed`, or
    /// from the OS when unset.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self::with_rng(config, rng)
    }

    /// Build an empty world around a caller-supplied generator.
    pub fn with_rng(config: SimConfig, rng: fastrand::Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = Bounds::new(config.width, config.height);
        let grid = SpatialGrid::new(&bounds, config.tile_width, config.tile_height);
        log::debug!(
            "World {}x{} with {}x{} tiles",
            config.width,
            config.height,
            grid.cols(),
            grid.rows()
        );
        let history = PopulationHistory::new(config.history_capacity);
        Ok(Self {
            config,
            bounds,
            ecs: hecs::World::new(),
            bufs: TickBuffers::new(grid),
            rng,
            tick: 0,
            predator_births: 0,
            prey_births: 0,
            predator_deaths: 0,
            prey_deaths: 0,
            summary: StatsSummary::default(),
            history,
            timers: SystemTimers::new(),
        })
    }

    /// Reset the clock and seed the initial populations at random positions.
    pub fn start(&mut self) {
        self.ecs.clear();
        self.tick = 0;
        self.predator_births = 0;
        self.prey_births = 0;
        self.predator_deaths = 0;
        self.prey_deaths = 0;
        self.history.clear();

        agent::spawn_initial(&mut self.ecs, &self.config, &self.bounds, &mut self.rng);
        self.summary = self.census();
        log::info!(
            "Seeded {} predators and {} prey",
            self.config.predator.initial_count,
            self.config.prey.initial_count
        );
    }

    /// Advance the simulation by one timestep.
    pub fn tick(&mut self) {
        let report = systems::tick(
            &mut self.ecs,
            &self.config,
            &self.bounds,
            &mut self.rng,
            &mut self.bufs,
            &mut self.timers,
        );
        self.tick += 1;
        self.record(&report);

        if self.tick % self.config.sample_interval == 0 {
            self.history.record(PopulationSample {
                tick: self.tick,
                predators: self.summary.predators.population,
                prey: self.summary.prey.population,
            });
        }
    }

    fn record(&mut self, report: &TickReport) {
        self.predator_births += report.births(Species::Predator) as u64;
        self.prey_births += report.births(Species::Prey) as u64;
        self.predator_deaths += report.deaths(Species::Predator) as u64;
        self.prey_deaths += report.deaths(Species::Prey) as u64;

        let before = self.summary;
        let mut summary = self.census();
        summary.predators.averages = report.predator_traits.averages();
        summary.prey.averages = report.prey_traits.averages();
        self.summary = summary;

        if report.births(Species::Predator) + report.births(Species::Prey) > 0
            || report.deaths(Species::Predator) + report.deaths(Species::Prey) > 0
        {
            log::debug!(
                "tick {}: +{}/-{} predators, +{}/-{} prey",
                self.tick,
                report.predator_births,
                report.predator_deaths,
                report.prey_births,
                report.prey_deaths,
            );
        }
        for species in [Species::Predator, Species::Prey] {
            if before.species(species).population > 0 && summary.species(species).population == 0 {
                log::info!("{} population went extinct at tick {}", species.label(), self.tick);
            }
        }
    }

    /// Counts and cumulative totals; averages are filled in by the tick.
    fn census(&self) -> StatsSummary {
        let predators = self.ecs.query::<&Hunter>().iter().count();
        let prey = self.ecs.query::<&Grazer>().iter().count();
        StatsSummary {
            tick: self.tick,
            predators: SpeciesSummary {
                population: predators,
                births_total: self.predator_births,
                deaths_total: self.predator_deaths,
                ..SpeciesSummary::empty(Species::Predator)
            },
            prey: SpeciesSummary {
                population: prey,
                births_total: self.prey_births,
                deaths_total: self.prey_deaths,
                ..SpeciesSummary::empty(Species::Prey)
            },
        }
    }

    /// Spawn a predator with default traits. Useful for scripted scenarios.
    pub fn spawn_predator(&mut self, pos: Vec2, food: f32) -> hecs::Entity {
        let c = self.config.predator;
        let wander_to = self.bounds.random_point(&mut self.rng);
        agent::spawn_predator(
            &mut self.ecs,
            self.bounds.wrap(pos),
            Vitals::new(food.clamp(0.0, 100.0), c.life, c.initial_mating_cooldown),
            c.traits,
            c.hunter,
            wander_to,
        )
    }

    /// Spawn a prey with default traits. Useful for scripted scenarios.
    pub fn spawn_prey(&mut self, pos: Vec2, food: f32) -> hecs::Entity {
        let c = self.config.prey;
        let wander_to = self.bounds.random_point(&mut self.rng);
        agent::spawn_prey(
            &mut self.ecs,
            self.bounds.wrap(pos),
            Vitals::new(food.clamp(0.0, 100.0), c.life, c.initial_mating_cooldown),
            c.traits,
            c.grazer,
            wander_to,
        )
    }

    pub fn predators(&self) -> Vec<AgentView> {
        self.views::<Hunter>()
    }

    pub fn prey(&self) -> Vec<AgentView> {
        self.views::<Grazer>()
    }

    fn views<M: hecs::Component>(&self) -> Vec<AgentView> {
        self.ecs
            .query::<(&Position, &Vitals, &Behavior, &M)>()
            .iter()
            .filter(|(_, (_, vitals, _, _))| vitals.alive())
            .map(|(entity, (pos, vitals, behavior, _))| AgentView {
                entity,
                position: pos.0,
                food: vitals.food,
                energy: vitals.energy,
                state: behavior.state,
            })
            .collect()
    }

    /// Live view of one agent, if it is still around.
    pub fn agent(&self, entity: hecs::Entity) -> Option<AgentView> {
        let pos = self.ecs.get::<&Position>(entity).ok()?.0;
        let vitals = *self.ecs.get::<&Vitals>(entity).ok()?;
        let state = self.ecs.get::<&Behavior>(entity).ok()?.state;
        Some(AgentView {
            entity,
            position: pos,
            food: vitals.food,
            energy: vitals.energy,
            state,
        })
    }

    pub fn traits(&self, entity: hecs::Entity) -> Option<Traits> {
        self.ecs.get::<&Traits>(entity).ok().map(|t| *t)
    }

    pub fn stats_summary(&self) -> &StatsSummary {
        &self.summary
    }

    pub fn population_history(&self) -> &PopulationHistory {
        &self.history
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn timers(&self) -> &SystemTimers {
        &self.timers
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
