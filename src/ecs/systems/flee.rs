use crate::agent::prey;
use crate::ecs::components::{Behavior, BehaviorState, Species, Traits};
use crate::geometry::distance;
use crate::spatial::{AgentSnapshot, SpatialGrid};

use super::{is_alive, resolve_target};

/// Prey perception. Idle prey flee from any predator inside their alert
/// range; fleeing prey switch to a predator closer than their current one.
pub fn update(
    world: &mut hecs::World,
    snapshots: &[AgentSnapshot],
    grid: &SpatialGrid,
    neighbors: &mut Vec<u32>,
) {
    for snap in snapshots.iter().filter(|s| s.species == Species::Prey) {
        let me = snap.entity;
        if !is_alive(world, me) {
            continue;
        }
        let (Ok(traits), Ok(behavior)) = (
            world.get::<&Traits>(me).map(|t| *t),
            world.get::<&Behavior>(me).map(|b| *b),
        ) else {
            continue;
        };
        let mut behavior = behavior;

        neighbors.clear();
        grid.query_radius(snap.pos, traits.alert_range, |idx| neighbors.push(idx));

        let mut threat_dist = match behavior.state {
            BehaviorState::Fleeing => {
                resolve_target(world, behavior.target).map(|t| distance(snap.pos, t))
            }
            _ => None,
        };
        let before = behavior;

        for &idx in neighbors.iter() {
            let other = &snapshots[idx as usize];
            if other.species != Species::Predator || !is_alive(world, other.entity) {
                continue;
            }
            let dist = distance(snap.pos, other.pos);
            if prey::should_avoid(&behavior, traits.alert_range, dist, threat_dist) {
                prey::avoid(&mut behavior, other.entity);
                threat_dist = Some(dist);
            }
        }

        if behavior != before {
            log::trace!("{me:?} fleeing from {:?}", behavior.target_entity());
            if let Ok(mut slot) = world.get::<&mut Behavior>(me) {
                *slot = behavior;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{spawn_predator, spawn_prey};
    use crate::config::SimConfig;
    use crate::ecs::components::{Target, Vitals};
    use crate::ecs::systems::spatial;
    use crate::geometry::Bounds;
    use glam::Vec2;

    fn run(world: &mut hecs::World, config: &SimConfig) {
        let mut grid = SpatialGrid::new(
            &Bounds::new(config.width, config.height),
            config.tile_width,
            config.tile_height,
        );
        let mut snapshots = Vec::new();
        spatial::rebuild(world, &mut grid, &mut snapshots);
        update(world, &snapshots, &grid, &mut Vec::new());
    }

    fn predator(world: &mut hecs::World, config: &SimConfig, pos: Vec2) -> hecs::Entity {
        let c = config.predator;
        spawn_predator(world, pos, Vitals::new(90.0, c.life, 0.0), c.traits, c.hunter, pos)
    }

    fn prey(world: &mut hecs::World, config: &SimConfig, pos: Vec2) -> hecs::Entity {
        let c = config.prey;
        spawn_prey(world, pos, Vitals::new(90.0, c.life, 0.0), c.traits, c.grazer, pos)
    }

    fn behavior(world: &hecs::World, e: hecs::Entity) -> Behavior {
        *world.get::<&Behavior>(e).unwrap()
    }

    #[test]
    fn prey_flees_from_predator_in_range() {
        let config = SimConfig::default();
        let mut world = hecs::World::new();
        let sheep = prey(&mut world, &config, Vec2::new(400.0, 300.0));
        let wolf = predator(&mut world, &config, Vec2::new(430.0, 300.0));
        run(&mut world, &config);
        let b = behavior(&world, sheep);
        assert_eq!(b.state, BehaviorState::Fleeing);
        assert_eq!(b.target, Target::Agent(wolf));
    }

    #[test]
    fn prey_ignores_distant_predator() {
        let config = SimConfig::default();
        let mut world = hecs::World::new();
        let sheep = prey(&mut world, &config, Vec2::new(400.0, 300.0));
        predator(&mut world, &config, Vec2::new(440.0, 340.0));
        run(&mut world, &config);
        assert_eq!(behavior(&world, sheep).state, BehaviorState::Idle);
    }

    #[test]
    fn fleeing_prey_switches_to_closer_threat() {
        let config = SimConfig::default();
        let mut world = hecs::World::new();
        let sheep = prey(&mut world, &config, Vec2::new(400.0, 300.0));
        let old = predator(&mut world, &config, Vec2::new(440.0, 300.0));
        let new = predator(&mut world, &config, Vec2::new(400.0, 310.0));
        if let Ok(mut b) = world.get::<&mut Behavior>(sheep) {
            prey::avoid(&mut b, old);
        }
        run(&mut world, &config);
        assert_eq!(behavior(&world, sheep).target, Target::Agent(new));
    }

    #[test]
    fn dead_predator_is_not_a_threat() {
        let config = SimConfig::default();
        let mut world = hecs::World::new();
        let sheep = prey(&mut world, &config, Vec2::new(400.0, 300.0));
        let wolf = predator(&mut world, &config, Vec2::new(410.0, 300.0));
        let mut grid = SpatialGrid::new(&Bounds::new(config.width, config.height), 20.0, 20.0);
        let mut snapshots = Vec::new();
        spatial::rebuild(&world, &mut grid, &mut snapshots);
        world.get::<&mut Vitals>(wolf).unwrap().dead = true;
        update(&mut world, &snapshots, &grid, &mut Vec::new());
        assert_eq!(behavior(&world, sheep).state, BehaviorState::Idle);
    }
}
