use glam::Vec2;

use crate::config::{MotionScaling, ENERGY_FACTOR, FOOD_TO_ENERGY_FACTOR, RESOURCE_MAX};
use crate::ecs::components::{Behavior, BehaviorState, Target, Traits, Vitals};
use crate::geometry::{distance, move_away, move_toward, Bounds};

/// World-wide inputs to a single agent update.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub dt: f32,
    pub bounds: Bounds,
    pub motion: MotionScaling,
    /// Pursuit ends and wander points count as reached inside this distance.
    pub arrive_distance: f32,
}

/// Species-specific inputs to a single agent update.
#[derive(Debug, Clone, Copy)]
pub struct Metabolism {
    /// Quit range while pursuing, safe range while fleeing.
    pub release_range: f32,
    /// Net food change per second.
    pub food_rate: f32,
}

/// Mutable view of one agent's components.
pub struct Body<'a> {
    pub pos: &'a mut Vec2,
    pub behavior: &'a mut Behavior,
    pub vitals: &'a mut Vitals,
    pub traits: &'a Traits,
}

/// Advance one agent by `env.dt`.
///
/// `target_pos` is the resolved position of the behavior target, or `None`
/// when the target agent no longer exists or has died.
pub fn update(
    body: Body<'_>,
    metabolism: Metabolism,
    target_pos: Option<Vec2>,
    env: &Environment,
    rng: &mut fastrand::Rng,
) {
    let Body {
        pos,
        behavior,
        vitals,
        traits,
    } = body;
    let dt = env.dt;

    if vitals.mating_cooldown > 0.0 {
        vitals.mating_cooldown -= dt;
    }

    vitals.life -= dt;
    if vitals.life < 0.0 {
        vitals.dead = true;
        return;
    }

    if vitals.freeze > 0.0 {
        vitals.freeze -= dt;
        regenerate(vitals, dt);
    } else {
        run(pos, behavior, vitals, traits, metabolism, target_pos, env, rng);
        if behavior.state == BehaviorState::Idle {
            wander(pos, behavior, vitals, traits, env, rng);
        }
    }

    let food = vitals.food + metabolism.food_rate * dt;
    if food < 0.0 {
        vitals.dead = true;
    }
    vitals.food = food.clamp(0.0, RESOURCE_MAX);
    vitals.energy = vitals.energy.clamp(0.0, RESOURCE_MAX);
}

/// Pursuing/fleeing step. Falls back to idle when the target is gone, out
/// of range, or the agent can't pay for the sprint.
#[allow(clippy::too_many_arguments)]
fn run(
    pos: &mut Vec2,
    behavior: &mut Behavior,
    vitals: &mut Vitals,
    traits: &Traits,
    metabolism: Metabolism,
    target_pos: Option<Vec2>,
    env: &Environment,
    rng: &mut fastrand::Rng,
) {
    let fleeing = match behavior.state {
        BehaviorState::Idle => return,
        BehaviorState::Pursuing => false,
        BehaviorState::Fleeing => true,
    };

    let in_range = target_pos.filter(|&target| {
        let d = distance(*pos, target);
        if fleeing {
            d <= metabolism.release_range
        } else {
            d <= metabolism.release_range && d >= env.arrive_distance
        }
    });
    let Some(target) = in_range else {
        behavior.rest(env.bounds.random_point(rng));
        return;
    };

    let cost = traits.weight * traits.run_speed * env.dt * ENERGY_FACTOR;
    if vitals.energy <= cost {
        behavior.rest(env.bounds.random_point(rng));
        return;
    }

    let step = env.dt * traits.run_speed * pace(vitals.food);
    *pos = if fleeing {
        move_away(*pos, target, step, &env.bounds, env.motion)
    } else {
        move_toward(*pos, target, step, &env.bounds, env.motion)
    };
    vitals.energy -= cost;
}

/// Idle step: recover energy and stroll toward the wander point.
fn wander(
    pos: &mut Vec2,
    behavior: &mut Behavior,
    vitals: &mut Vitals,
    traits: &Traits,
    env: &Environment,
    rng: &mut fastrand::Rng,
) {
    regenerate(vitals, env.dt);
    match behavior.target {
        Target::Point(point) if distance(*pos, point) > env.arrive_distance => {
            let step = env.dt * traits.walk_speed * pace(vitals.food);
            *pos = move_toward(*pos, point, step, &env.bounds, env.motion);
        }
        _ => behavior.rest(env.bounds.random_point(rng)),
    }
}

fn regenerate(vitals: &mut Vitals, dt: f32) {
    vitals.energy = (vitals.energy + vitals.food * dt * FOOD_TO_ENERGY_FACTOR).min(RESOURCE_MAX);
}

/// Well-fed agents move faster: 0.5x when starving up to 1x when full.
fn pace(food: f32) -> f32 {
    0.5 + food / 200.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAITS: Traits = Traits {
        walk_speed: 40.0,
        run_speed: 60.0,
        weight: 40.0,
        alert_range: 50.0,
        mate_rate: 0.4,
        mate_gap: 1.5,
    };

    const PREDATOR_DIET: Metabolism = Metabolism {
        release_range: 125.0,
        food_rate: -20.0,
    };

    fn env(dt: f32) -> Environment {
        Environment {
            dt,
            bounds: Bounds::new(960.0, 640.0),
            motion: MotionScaling::Quadratic,
            arrive_distance: 1.0,
        }
    }

    struct Agent {
        pos: Vec2,
        behavior: Behavior,
        vitals: Vitals,
    }

    impl Agent {
        fn new(pos: Vec2, food: f32, life: f32) -> Self {
            Self {
                pos,
                behavior: Behavior::wandering(Vec2::new(900.0, 600.0)),
                vitals: Vitals::new(food, life, 0.0),
            }
        }

        fn step(
            &mut self,
            metabolism: Metabolism,
            target: Option<Vec2>,
            env: &Environment,
            rng: &mut fastrand::Rng,
        ) {
            update(
                Body {
                    pos: &mut self.pos,
                    behavior: &mut self.behavior,
                    vitals: &mut self.vitals,
                    traits: &TRAITS,
                },
                metabolism,
                target,
                env,
                rng,
            );
        }
    }

    #[test]
    fn expired_life_kills_immediately() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut prey = Agent::new(Vec2::new(100.0, 100.0), 80.0, 0.1);
        let before = prey.pos;
        prey.step(
            Metabolism { release_range: 80.0, food_rate: 20.0 },
            None,
            &env(1.0),
            &mut rng,
        );
        assert!(prey.vitals.dead);
        assert_eq!(prey.pos, before);
        assert_eq!(prey.vitals.food, 80.0);
    }

    #[test]
    fn starving_marks_dead_and_clamps_food() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut wolf = Agent::new(Vec2::new(100.0, 100.0), 5.0, 60.0);
        wolf.step(PREDATOR_DIET, None, &env(1.0), &mut rng);
        assert!(wolf.vitals.dead);
        assert_eq!(wolf.vitals.food, 0.0);
    }

    #[test]
    fn resources_stay_clamped() {
        let mut rng = fastrand::Rng::with_seed(3);
        let graze = Metabolism { release_range: 80.0, food_rate: 20.0 };
        for &(food, energy, state) in &[
            (99.0, 99.9, BehaviorState::Idle),
            (100.0, 100.0, BehaviorState::Idle),
            (0.5, 0.01, BehaviorState::Pursuing),
            (50.0, 100.0, BehaviorState::Fleeing),
        ] {
            let mut a = Agent::new(Vec2::new(300.0, 300.0), food, 30.0);
            a.vitals.energy = energy;
            a.behavior.state = state;
            for _ in 0..120 {
                a.step(graze, Some(Vec2::new(310.0, 300.0)), &env(1.0 / 60.0), &mut rng);
                assert!((0.0..=100.0).contains(&a.vitals.food));
                assert!((0.0..=100.0).contains(&a.vitals.energy));
            }
            let mut b = Agent::new(Vec2::new(300.0, 300.0), food, 30.0);
            b.vitals.energy = energy;
            b.step(PREDATOR_DIET, None, &env(1.0), &mut rng);
            assert!((0.0..=100.0).contains(&b.vitals.food));
            assert!((0.0..=100.0).contains(&b.vitals.energy));
        }
    }

    #[test]
    fn cooldown_counts_down_but_not_below_zero_once_expired() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut a = Agent::new(Vec2::new(300.0, 300.0), 100.0, 30.0);
        a.vitals.mating_cooldown = 0.05;
        let e = env(1.0 / 60.0);
        for _ in 0..10 {
            a.step(PREDATOR_DIET, None, &e, &mut rng);
        }
        let settled = a.vitals.mating_cooldown;
        assert!(settled <= 0.0);
        a.step(PREDATOR_DIET, None, &e, &mut rng);
        assert_eq!(a.vitals.mating_cooldown, settled);
    }

    #[test]
    fn pursuit_moves_toward_target_and_costs_energy() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut wolf = Agent::new(Vec2::new(100.0, 100.0), 100.0, 60.0);
        wolf.behavior.state = BehaviorState::Pursuing;
        let e = env(1.0 / 60.0);
        wolf.step(PREDATOR_DIET, Some(Vec2::new(150.0, 100.0)), &e, &mut rng);

        assert_eq!(wolf.behavior.state, BehaviorState::Pursuing);
        assert!(wolf.pos.x > 100.0);
        let cost = 40.0 * 60.0 * e.dt * ENERGY_FACTOR;
        assert!((wolf.vitals.energy - (100.0 - cost)).abs() < 1e-4);
    }

    #[test]
    fn pursuit_ends_when_target_lost_or_reached() {
        let mut rng = fastrand::Rng::with_seed(6);
        let e = env(1.0 / 60.0);
        for target in [None, Some(Vec2::new(400.0, 100.0)), Some(Vec2::new(100.5, 100.0))] {
            let mut wolf = Agent::new(Vec2::new(100.0, 100.0), 100.0, 60.0);
            wolf.behavior.state = BehaviorState::Pursuing;
            wolf.step(PREDATOR_DIET, target, &e, &mut rng);
            assert_eq!(wolf.behavior.state, BehaviorState::Idle);
            assert!(matches!(wolf.behavior.target, Target::Point(_)));
        }
    }

    #[test]
    fn exhausted_runner_falls_back_to_idle_and_recovers() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut sheep = Agent::new(Vec2::new(100.0, 100.0), 50.0, 60.0);
        sheep.behavior.state = BehaviorState::Fleeing;
        sheep.vitals.energy = 0.01;
        let e = env(1.0 / 60.0);
        sheep.step(
            Metabolism { release_range: 80.0, food_rate: 0.0 },
            Some(Vec2::new(110.0, 100.0)),
            &e,
            &mut rng,
        );
        assert_eq!(sheep.behavior.state, BehaviorState::Idle);
        assert!(sheep.vitals.energy > 0.01);
    }

    #[test]
    fn fleeing_moves_away_until_safe() {
        let mut rng = fastrand::Rng::with_seed(8);
        let e = env(1.0 / 60.0);
        let safe = Metabolism { release_range: 80.0, food_rate: 0.0 };

        let mut sheep = Agent::new(Vec2::new(100.0, 100.0), 100.0, 60.0);
        sheep.behavior.state = BehaviorState::Fleeing;
        sheep.step(safe, Some(Vec2::new(120.0, 100.0)), &e, &mut rng);
        assert_eq!(sheep.behavior.state, BehaviorState::Fleeing);
        assert!(sheep.pos.x < 100.0);

        sheep.step(safe, Some(Vec2::new(300.0, 100.0)), &e, &mut rng);
        assert_eq!(sheep.behavior.state, BehaviorState::Idle);
    }

    #[test]
    fn frozen_agent_rests_in_place() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut a = Agent::new(Vec2::new(100.0, 100.0), 100.0, 60.0);
        a.vitals.freeze = 1.0;
        a.vitals.energy = 50.0;
        a.step(PREDATOR_DIET, None, &env(0.5), &mut rng);
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
        assert_eq!(a.vitals.freeze, 0.5);
        assert!(a.vitals.energy > 50.0);
    }

    #[test]
    fn idle_agent_picks_new_point_on_arrival() {
        let mut rng = fastrand::Rng::with_seed(10);
        let mut a = Agent::new(Vec2::new(100.0, 100.0), 100.0, 60.0);
        a.behavior = Behavior::wandering(Vec2::new(100.2, 100.0));
        a.step(PREDATOR_DIET, None, &env(1.0 / 60.0), &mut rng);
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
        assert_ne!(a.behavior.target, Target::Point(Vec2::new(100.2, 100.0)));
    }
}
