use crate::agent::predator::{self, FightOutcome};
use crate::ecs::components::{Behavior, Hunter, Species, Traits};
use crate::geometry::distance;
use crate::spatial::{AgentSnapshot, SpatialGrid};

use super::{resolve_target, store_vitals, vitals_of};

/// Predator perception. Every hungry predator scans its alert range: prey
/// within contact distance are eaten, weak rivals within contact distance are
/// fought, anything else worth hunting inside the alert range is chased.
pub fn update(
    world: &mut hecs::World,
    snapshots: &[AgentSnapshot],
    grid: &SpatialGrid,
    neighbors: &mut Vec<u32>,
    contact_distance: f32,
) {
    for snap in snapshots.iter().filter(|s| s.species == Species::Predator) {
        let me = snap.entity;
        let Some((traits, hunter, mut behavior)) = hunter_state(world, me) else {
            continue;
        };
        let Some(mut my_vitals) = vitals_of(world, me) else {
            continue;
        };
        if my_vitals.dead || my_vitals.food >= hunter.eat_threshold {
            continue;
        }

        neighbors.clear();
        grid.query_radius(snap.pos, traits.alert_range, |idx| neighbors.push(idx));

        for &idx in neighbors.iter() {
            let other = &snapshots[idx as usize];
            if other.entity == me {
                continue;
            }
            let Some(mut their_vitals) = vitals_of(world, other.entity) else {
                continue;
            };
            if their_vitals.dead {
                continue;
            }
            let dist = distance(snap.pos, other.pos);

            match other.species {
                Species::Prey => {
                    if dist < contact_distance {
                        if predator::eat(&mut my_vitals, &mut their_vitals) {
                            log::trace!("{me:?} ate {:?}", other.entity);
                            store_vitals(world, me, my_vitals);
                            store_vitals(world, other.entity, their_vitals);
                        }
                    } else if dist < traits.alert_range {
                        let current = resolve_target(world, behavior.target);
                        predator::chase(&mut behavior, snap.pos, other.entity, other.pos, current);
                    }
                }
                Species::Predator => {
                    let Ok(rival_threshold) =
                        world.get::<&Hunter>(other.entity).map(|h| h.rival_threshold)
                    else {
                        continue;
                    };
                    let weak = their_vitals.food < rival_threshold
                        && my_vitals.food > their_vitals.food;
                    if !weak {
                        continue;
                    }
                    if dist < contact_distance {
                        let outcome = predator::fight(&mut my_vitals, &mut their_vitals);
                        if outcome != FightOutcome::NoContest {
                            log::trace!("{me:?} fought {:?}: {outcome:?}", other.entity);
                            store_vitals(world, me, my_vitals);
                            store_vitals(world, other.entity, their_vitals);
                        }
                        if my_vitals.dead {
                            break;
                        }
                    } else if dist < traits.alert_range {
                        let current = resolve_target(world, behavior.target);
                        predator::chase(&mut behavior, snap.pos, other.entity, other.pos, current);
                    }
                }
            }
        }

        if let Ok(mut slot) = world.get::<&mut Behavior>(me) {
            *slot = behavior;
        }
    }
}

fn hunter_state(world: &hecs::World, entity: hecs::Entity) -> Option<(Traits, Hunter, Behavior)> {
    let traits = *world.get::<&Traits>(entity).ok()?;
    let hunter = *world.get::<&Hunter>(entity).ok()?;
    let behavior = *world.get::<&Behavior>(entity).ok()?;
    Some((traits, hunter, behavior))
}
