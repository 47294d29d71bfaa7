use glam::Vec2;

use crate::ecs::components::{Behavior, BehaviorState, Target, Vitals};
use crate::geometry::distance;

/// Result of a predator-on-predator contest, from the initiator's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    Won,
    Lost,
    /// One side was already dead.
    NoContest,
}

/// Consume a prey. Returns `false` if the prey was already dead.
pub fn eat(hunter: &mut Vitals, prey: &mut Vitals) -> bool {
    if prey.dead || hunter.dead {
        return false;
    }
    prey.dead = true;
    hunter.food = (hunter.food + prey.food).min(100.0);
    true
}

/// Settle a contest between two predators. More food wins, ties go to the
/// initiator. The winner absorbs the loser's food.
pub fn fight(attacker: &mut Vitals, rival: &mut Vitals) -> FightOutcome {
    if attacker.dead || rival.dead {
        return FightOutcome::NoContest;
    }
    if attacker.food >= rival.food {
        rival.dead = true;
        attacker.food = (attacker.food + rival.food).min(100.0);
        FightOutcome::Won
    } else {
        attacker.dead = true;
        rival.food = (rival.food + attacker.food).min(100.0);
        FightOutcome::Lost
    }
}

/// Start or redirect a pursuit. While already pursuing, only a strictly
/// closer candidate (or losing track of the current one) switches targets.
///
/// Returns `true` when the target changed.
pub fn chase(
    behavior: &mut Behavior,
    pos: Vec2,
    candidate: hecs::Entity,
    candidate_pos: Vec2,
    current_target_pos: Option<Vec2>,
) -> bool {
    if behavior.state != BehaviorState::Pursuing {
        behavior.state = BehaviorState::Pursuing;
        behavior.target = Target::Agent(candidate);
        return true;
    }
    if behavior.target == Target::Agent(candidate) {
        return false;
    }
    match current_target_pos {
        Some(current) if distance(pos, current) <= distance(pos, candidate_pos) => false,
        _ => {
            behavior.target = Target::Agent(candidate);
            true
        }
    }
}
