use crate::agent::mating::{self, Breeding, Heritable, Newborn, Parent};
use crate::config::SimConfig;
use crate::ecs::components::{Crowding, Grazer, Hunter, Species, Traits};
use crate::geometry::{distance, Bounds};
use crate::spatial::{AgentSnapshot, SpatialGrid};

use super::{store_vitals, vitals_of};

/// Children conceived this tick, spawned once the tick's updates are done.
#[derive(Default)]
pub struct Nursery {
    pub predators: Vec<Newborn<Hunter>>,
    pub prey: Vec<Newborn<Grazer>>,
}

impl Nursery {
    pub fn len(&self) -> usize {
        self.predators.len() + self.prey.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Predator mating: every unordered pair of live predators closer than the
/// mate radius, both above the food threshold, gets one mating check.
#[allow(clippy::too_many_arguments)]
pub fn predators(
    world: &mut hecs::World,
    snapshots: &[AgentSnapshot],
    grid: &SpatialGrid,
    neighbors: &mut Vec<u32>,
    nursery: &mut Nursery,
    config: &SimConfig,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
) {
    let c = &config.predator;
    let rules = breeding_rules(config, bounds, c.life, c.initial_mating_cooldown);

    for (i, snap) in snapshots.iter().enumerate() {
        if snap.species != Species::Predator {
            continue;
        }
        neighbors.clear();
        grid.query_radius(snap.pos, c.mate_radius, |idx| neighbors.push(idx));

        for &idx in neighbors.iter() {
            // Visit each unordered pair once.
            if idx as usize <= i {
                continue;
            }
            let other = &snapshots[idx as usize];
            if other.species != Species::Predator || distance(snap.pos, other.pos) >= c.mate_radius {
                continue;
            }
            if let Some(child) =
                try_mate::<Hunter>(world, snap, other, c.mate_food, &rules, rng)
            {
                log::trace!("predators {:?} + {:?} produced a child", snap.entity, other.entity);
                nursery.predators.push(child);
            }
        }
    }
}

/// Prey mating and crowding. Each live prey recounts its close same-species
/// neighbors (which slows its grazing) and gets a mating check with every
/// partner inside the mate radius.
#[allow(clippy::too_many_arguments)]
pub fn prey(
    world: &mut hecs::World,
    snapshots: &[AgentSnapshot],
    grid: &SpatialGrid,
    neighbors: &mut Vec<u32>,
    nursery: &mut Nursery,
    config: &SimConfig,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
) {
    let c = &config.prey;
    let rules = breeding_rules(config, bounds, c.life, c.initial_mating_cooldown);
    let reach = c.mate_radius.max(c.crowding_radius);

    for snap in snapshots.iter().filter(|s| s.species == Species::Prey) {
        if !vitals_of(world, snap.entity).is_some_and(|v| v.alive()) {
            continue;
        }
        neighbors.clear();
        grid.query_radius(snap.pos, reach, |idx| neighbors.push(idx));

        let mut crowd = 0;
        for &idx in neighbors.iter() {
            let other = &snapshots[idx as usize];
            if other.entity == snap.entity || other.species != Species::Prey {
                continue;
            }
            if !vitals_of(world, other.entity).is_some_and(|v| v.alive()) {
                continue;
            }
            let dist = distance(snap.pos, other.pos);
            if dist < c.mate_radius {
                if let Some(child) =
                    try_mate::<Grazer>(world, snap, other, c.mate_food, &rules, rng)
                {
                    log::trace!("prey {:?} + {:?} produced a child", snap.entity, other.entity);
                    nursery.prey.push(child);
                }
            }
            if dist < c.crowding_radius {
                crowd += 1;
            }
        }

        if let Ok(mut crowding) = world.get::<&mut Crowding>(snap.entity) {
            crowding.0 = crowd;
        }
    }
}

fn breeding_rules(config: &SimConfig, bounds: &Bounds, life: f32, initial_cooldown: f32) -> Breeding {
    Breeding {
        bounds: *bounds,
        spawn_spread: config.spawn_spread,
        mutation: config.mutation,
        mate_freeze: config.mate_freeze,
        life,
        initial_cooldown,
    }
}

/// Run one mating check between two agents of the same species and write
/// the parents' updated vitals back.
fn try_mate<G: Heritable + hecs::Component>(
    world: &hecs::World,
    a: &AgentSnapshot,
    b: &AgentSnapshot,
    mate_food: f32,
    rules: &Breeding,
    rng: &mut fastrand::Rng,
) -> Option<Newborn<G>> {
    let mut va = vitals_of(world, a.entity)?;
    let mut vb = vitals_of(world, b.entity)?;
    if va.food <= mate_food || vb.food <= mate_food {
        return None;
    }
    let (ta, ga) = genes::<G>(world, a.entity)?;
    let (tb, gb) = genes::<G>(world, b.entity)?;

    let child = mating::mate(
        Parent {
            pos: a.pos,
            vitals: &mut va,
            traits: &ta,
            instinct: &ga,
        },
        Parent {
            pos: b.pos,
            vitals: &mut vb,
            traits: &tb,
            instinct: &gb,
        },
        rules,
        rng,
    )?;
    store_vitals(world, a.entity, va);
    store_vitals(world, b.entity, vb);
    Some(child)
}

fn genes<G: Heritable + hecs::Component>(world: &hecs::World, entity: hecs::Entity) -> Option<(Traits, G)> {
    let traits = *world.get::<&Traits>(entity).ok()?;
    let instinct = *world.get::<&G>(entity).ok()?;
    Some((traits, instinct))
}
