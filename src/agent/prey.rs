use crate::ecs::components::{Behavior, BehaviorState, Target};

/// Start fleeing from `threat`, replacing any previous threat.
pub fn avoid(behavior: &mut Behavior, threat: hecs::Entity) {
    behavior.state = BehaviorState::Fleeing;
    behavior.target = Target::Agent(threat);
}

/// Whether a predator at `threat_dist` should become the prey's threat.
///
/// An idle prey reacts to anything inside its alert range. A fleeing prey
/// switches only to a threat closer than the one it is already running from.
pub fn should_avoid(
    behavior: &Behavior,
    alert_range: f32,
    threat_dist: f32,
    current_threat_dist: Option<f32>,
) -> bool {
    match behavior.state {
        BehaviorState::Fleeing => threat_dist < current_threat_dist.unwrap_or(f32::INFINITY),
        BehaviorState::Idle => threat_dist < alert_range,
        BehaviorState::Pursuing => false,
    }
}
