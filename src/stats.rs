//! Read-only aggregates for dashboards and plots.

use std::fmt;

use glam::Vec2;

use crate::ecs::components::{BehaviorState, Species, Traits};
use crate::util::ring::RingBuffer;

/// Running sums of heritable traits over one population.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraitTally {
    count: usize,
    walk_speed: f64,
    run_speed: f64,
    weight: f64,
    alert_range: f64,
    /// Quit range for predators, safe range for prey.
    release_range: f64,
}

impl TraitTally {
    pub fn add(&mut self, traits: &Traits, release_range: f32) {
        self.count += 1;
        self.walk_speed += traits.walk_speed as f64;
        self.run_speed += traits.run_speed as f64;
        self.weight += traits.weight as f64;
        self.alert_range += traits.alert_range as f64;
        self.release_range += release_range as f64;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Means over everything tallied, or `None` for an empty population.
    pub fn averages(&self) -> Option<TraitAverages> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(TraitAverages {
            walk_speed: (self.walk_speed / n) as f32,
            run_speed: (self.run_speed / n) as f32,
            weight: (self.weight / n) as f32,
            alert_range: (self.alert_range / n) as f32,
            release_range: (self.release_range / n) as f32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitAverages {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub weight: f32,
    pub alert_range: f32,
    pub release_range: f32,
}

/// Per-species line of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesSummary {
    pub species: Species,
    /// Live agents after the last tick.
    pub population: usize,
    /// Children born since the world started.
    pub births_total: u64,
    pub deaths_total: u64,
    /// Mean traits over the agents updated during the last tick.
    pub averages: Option<TraitAverages>,
}

impl SpeciesSummary {
    pub fn empty(species: Species) -> Self {
        Self {
            species,
            population: 0,
            births_total: 0,
            deaths_total: 0,
            averages: None,
        }
    }
}

impl fmt::Display for SpeciesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range_label = match self.species {
            Species::Predator => "Quit Range",
            Species::Prey => "Safe Range",
        };
        write!(
            f,
            "{} x{} (born {}, died {}) | ",
            self.species.label(),
            self.population,
            self.births_total,
            self.deaths_total,
        )?;
        match self.averages {
            Some(avg) => write!(
                f,
                "Walk Speed: {:.2}, Run Speed: {:.2}, Weight: {:.2}, Alert Range: {:.2}, {}: {:.2}",
                avg.walk_speed,
                avg.run_speed,
                avg.weight,
                avg.alert_range,
                range_label,
                avg.release_range,
            ),
            None => write!(f, "extinct"),
        }
    }
}

/// Aggregate state after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub tick: u64,
    pub predators: SpeciesSummary,
    pub prey: SpeciesSummary,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            tick: 0,
            predators: SpeciesSummary::empty(Species::Predator),
            prey: SpeciesSummary::empty(Species::Prey),
        }
    }
}

impl StatsSummary {
    pub fn species(&self, species: Species) -> &SpeciesSummary {
        match species {
            Species::Predator => &self.predators,
            Species::Prey => &self.prey,
        }
    }

    /// Both populations are gone.
    pub fn is_extinct(&self) -> bool {
        self.predators.population == 0 && self.prey.population == 0
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.predators)?;
        write!(f, "{}", self.prey)
    }
}

/// One sampled point of the population time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationSample {
    pub tick: u64,
    pub predators: usize,
    pub prey: usize,
}

/// Population counts sampled every few ticks, oldest dropped first.
#[derive(Debug, Clone)]
pub struct PopulationHistory {
    samples: RingBuffer<PopulationSample>,
}

impl PopulationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: RingBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, sample: PopulationSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn latest(&self) -> Option<PopulationSample> {
        self.samples.latest().copied()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PopulationSample> {
        self.samples.iter()
    }

    /// Separate predator and prey series, for plotting.
    pub fn series(&self) -> (Vec<usize>, Vec<usize>) {
        self.iter().map(|s| (s.predators, s.prey)).unzip()
    }
}

/// What a renderer needs to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub entity: hecs::Entity,
    pub position: Vec2,
    pub food: f32,
    pub energy: f32,
    pub state: BehaviorState,
}
