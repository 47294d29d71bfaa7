use glam::Vec2;

use crate::ecs::components::{Grazer, Hunter, Traits, Vitals};
use crate::geometry::Bounds;

/// Draws the bounded multiplicative perturbation applied to inherited traits.
pub struct Mutation<'a> {
    rng: &'a mut fastrand::Rng,
    /// Half-width of the factor around 1.0 (0.1 gives `[0.9, 1.1]`).
    spread: f32,
}

impl<'a> Mutation<'a> {
    pub fn new(rng: &'a mut fastrand::Rng, spread: f32) -> Self {
        Self { rng, spread }
    }

    /// Parental mean times a random factor in `[1 - spread, 1 + spread]`.
    pub fn blend(&mut self, a: f32, b: f32) -> f32 {
        let factor = 1.0 + (self.rng.f32() * 2.0 - 1.0) * self.spread;
        average(a, b) * factor
    }
}

pub fn average(a: f32, b: f32) -> f32 {
    (a + b) / 2.0
}

/// Trait sets that pass from two parents to a child.
pub trait Heritable: Copy {
    fn inherit(a: &Self, b: &Self, mutation: &mut Mutation<'_>) -> Self;
}

impl Heritable for Traits {
    fn inherit(a: &Self, b: &Self, mutation: &mut Mutation<'_>) -> Self {
        Self {
            walk_speed: mutation.blend(a.walk_speed, b.walk_speed),
            run_speed: mutation.blend(a.run_speed, b.run_speed),
            weight: mutation.blend(a.weight, b.weight),
            alert_range: mutation.blend(a.alert_range, b.alert_range),
            mate_rate: average(a.mate_rate, b.mate_rate),
            mate_gap: average(a.mate_gap, b.mate_gap),
        }
    }
}

impl Heritable for Hunter {
    fn inherit(a: &Self, b: &Self, mutation: &mut Mutation<'_>) -> Self {
        Self {
            quit_range: mutation.blend(a.quit_range, b.quit_range),
            eat_threshold: average(a.eat_threshold, b.eat_threshold),
            rival_threshold: average(a.rival_threshold, b.rival_threshold),
        }
    }
}

impl Heritable for Grazer {
    fn inherit(a: &Self, b: &Self, mutation: &mut Mutation<'_>) -> Self {
        Self {
            safe_range: mutation.blend(a.safe_range, b.safe_range),
        }
    }
}

/// One side of a mating check.
pub struct Parent<'a, G> {
    pub pos: Vec2,
    pub vitals: &'a mut Vitals,
    pub traits: &'a Traits,
    pub instinct: &'a G,
}

/// A child waiting to be spawned at the end of the tick.
#[derive(Debug, Clone, Copy)]
pub struct Newborn<G> {
    pub pos: Vec2,
    pub vitals: Vitals,
    pub traits: Traits,
    pub instinct: G,
}

/// Species-independent rules for producing a child.
#[derive(Debug, Clone, Copy)]
pub struct Breeding {
    pub bounds: Bounds,
    pub spawn_spread: f32,
    pub mutation: f32,
    pub mate_freeze: f32,
    /// Lifespan a newborn starts with.
    pub life: f32,
    /// Cooldown a newborn starts with.
    pub initial_cooldown: f32,
}

/// Attempt to produce a child. Gated on both parents being alive and off
/// cooldown, then on the initiator's mate rate. On success both parents'
/// cooldowns reset to their own mate gap.
pub fn mate<G: Heritable>(
    initiator: Parent<'_, G>,
    partner: Parent<'_, G>,
    rules: &Breeding,
    rng: &mut fastrand::Rng,
) -> Option<Newborn<G>> {
    if initiator.vitals.dead || partner.vitals.dead {
        return None;
    }
    if initiator.vitals.mating_cooldown > 0.0 || partner.vitals.mating_cooldown > 0.0 {
        return None;
    }
    if rng.f32() >= initiator.traits.mate_rate {
        return None;
    }

    let mut mutation = Mutation::new(rng, rules.mutation);
    let traits = Traits::inherit(initiator.traits, partner.traits, &mut mutation);
    let instinct = G::inherit(initiator.instinct, partner.instinct, &mut mutation);

    let food = average(initiator.vitals.food, partner.vitals.food);
    let spread = rules.spawn_spread;
    let offset = Vec2::new(
        (rng.f32() * 2.0 - 1.0) * spread,
        (rng.f32() * 2.0 - 1.0) * spread,
    );

    initiator.vitals.mating_cooldown = initiator.traits.mate_gap;
    partner.vitals.mating_cooldown = partner.traits.mate_gap;
    initiator.vitals.freeze = rules.mate_freeze;
    partner.vitals.freeze = rules.mate_freeze;

    Some(Newborn {
        pos: rules.bounds.wrap(initiator.pos + offset),
        vitals: Vitals::new(food, rules.life, rules.initial_cooldown),
        traits,
        instinct,
    })
}
