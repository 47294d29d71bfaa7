pub mod lifecycle;
pub mod mating;
pub mod predator;
pub mod prey;

use glam::Vec2;

use crate::config::SimConfig;
use crate::ecs::components::*;
use crate::geometry::Bounds;
use mating::Newborn;

/// Spawn one predator.
pub fn spawn_predator(
    world: &mut hecs::World,
    pos: Vec2,
    vitals: Vitals,
    traits: Traits,
    hunter: Hunter,
    wander_to: Vec2,
) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Behavior::wandering(wander_to),
        vitals,
        traits,
        hunter,
    ))
}

/// Spawn one prey.
pub fn spawn_prey(
    world: &mut hecs::World,
    pos: Vec2,
    vitals: Vitals,
    traits: Traits,
    grazer: Grazer,
    wander_to: Vec2,
) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Behavior::wandering(wander_to),
        vitals,
        traits,
        grazer,
        Crowding::default(),
    ))
}

/// Seed both populations at random positions with default traits.
pub fn spawn_initial(
    world: &mut hecs::World,
    config: &SimConfig,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
) {
    let wolves = &config.predator;
    for _ in 0..wolves.initial_count {
        let pos = bounds.random_point(rng);
        let wander_to = bounds.random_point(rng);
        spawn_predator(
            world,
            pos,
            Vitals::new(100.0, wolves.life, wolves.initial_mating_cooldown),
            wolves.traits,
            wolves.hunter,
            wander_to,
        );
    }

    let sheep = &config.prey;
    for _ in 0..sheep.initial_count {
        let pos = bounds.random_point(rng);
        let wander_to = bounds.random_point(rng);
        spawn_prey(
            world,
            pos,
            Vitals::new(100.0, sheep.life, sheep.initial_mating_cooldown),
            sheep.traits,
            sheep.grazer,
            wander_to,
        );
    }
}

pub fn spawn_predator_newborn(
    world: &mut hecs::World,
    child: Newborn<Hunter>,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    let wander_to = bounds.random_point(rng);
    spawn_predator(world, child.pos, child.vitals, child.traits, child.instinct, wander_to)
}

pub fn spawn_prey_newborn(
    world: &mut hecs::World,
    child: Newborn<Grazer>,
    bounds: &Bounds,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    let wander_to = bounds.random_point(rng);
    spawn_prey(world, child.pos, child.vitals, child.traits, child.instinct, wander_to)
}
