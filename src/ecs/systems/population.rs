use crate::agent;
use crate::ecs::components::{Hunter, Vitals};
use crate::geometry::Bounds;

use super::breeding::Nursery;
use super::TickReport;

/// Replace the population: despawn every dead agent, then spawn every child
/// conceived this tick.
pub fn replace(
    world: &mut hecs::World,
    nursery: &mut Nursery,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
    report: &mut TickReport,
) {
    let mut dead = Vec::new();
    for (entity, (vitals, hunter)) in world.query::<(&Vitals, Option<&Hunter>)>().iter() {
        if vitals.dead {
            dead.push((entity, hunter.is_some()));
        }
    }
    for (entity, is_predator) in dead {
        if world.despawn(entity).is_ok() {
            if is_predator {
                report.predator_deaths += 1;
            } else {
                report.prey_deaths += 1;
            }
        }
    }

    for child in nursery.predators.drain(..) {
        agent::spawn_predator_newborn(world, child, bounds, rng);
        report.predator_births += 1;
    }
    for child in nursery.prey.drain(..) {
        agent::spawn_prey_newborn(world, child, bounds, rng);
        report.prey_births += 1;
    }
}
