use crate::agent::lifecycle::{self, Body, Environment, Metabolism};
use crate::config::{SimConfig, FOOD_COST};
use crate::ecs::components::{Behavior, Crowding, Grazer, Hunter, Position, Traits, Vitals};
use crate::geometry::Bounds;

use super::{resolve_target, TickReport};

/// Per-agent update for everyone alive at the start of the phase: cooldowns,
/// aging, motion, energy and food. Trait sums are tallied for reporting.
pub fn update(
    world: &mut hecs::World,
    config: &SimConfig,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
    report: &mut TickReport,
) {
    let env = Environment {
        dt: config.dt,
        bounds: *bounds,
        motion: config.motion,
        arrive_distance: config.arrive_distance,
    };

    let live: Vec<hecs::Entity> = world
        .query::<&Vitals>()
        .iter()
        .filter(|(_, vitals)| !vitals.dead)
        .map(|(entity, _)| entity)
        .collect();

    for entity in live {
        // Resolved per agent, so a target that aged out earlier in this
        // pass is already seen as gone.
        let Ok(target) = world.get::<&Behavior>(entity).map(|b| b.target) else {
            continue;
        };
        let target_pos = resolve_target(world, target);

        let Ok((pos, behavior, vitals, traits, hunter, grazer, crowding)) = world
            .query_one_mut::<(
                &mut Position,
                &mut Behavior,
                &mut Vitals,
                &Traits,
                Option<&Hunter>,
                Option<&Grazer>,
                Option<&Crowding>,
            )>(entity)
        else {
            continue;
        };

        let metabolism = match (hunter, grazer) {
            (Some(hunter), _) => {
                report.predator_traits.add(traits, hunter.quit_range);
                Metabolism {
                    release_range: hunter.quit_range,
                    food_rate: -FOOD_COST,
                }
            }
            (None, Some(grazer)) => {
                report.prey_traits.add(traits, grazer.safe_range);
                let crowd = crowding.map_or(0, |c| c.0);
                Metabolism {
                    release_range: grazer.safe_range,
                    food_rate: config.prey.graze_rate / (1 + crowd) as f32 - FOOD_COST,
                }
            }
            (None, None) => continue,
        };

        lifecycle::update(
            Body {
                pos: &mut pos.0,
                behavior,
                vitals,
                traits,
            },
            metabolism,
            target_pos,
            &env,
            rng,
        );
    }
}
