use glam::Vec2;

/// Current world position, always inside the world bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Which population an agent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Species {
    Predator,
    Prey,
}

impl Species {
    pub fn label(self) -> &'static str {
        match self {
            Species::Predator => "Predator",
            Species::Prey => "Prey",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BehaviorState {
    /// Wandering toward a random point, regenerating energy.
    #[default]
    Idle,
    /// Running after another agent (predators).
    Pursuing,
    /// Running away from another agent (prey).
    Fleeing,
}

/// What an agent is moving relative to.
///
/// Agent targets are weak: the entity may have been eaten or despawned since
/// it was picked, so it has to be resolved through the world every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Point(Vec2),
    Agent(hecs::Entity),
}

/// Behavior state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Behavior {
    pub state: BehaviorState,
    pub target: Target,
}

impl Behavior {
    pub fn wandering(point: Vec2) -> Self {
        Self {
            state: BehaviorState::Idle,
            target: Target::Point(point),
        }
    }

    /// Drop whatever the agent was doing and wander toward `point`.
    pub fn rest(&mut self, point: Vec2) {
        self.state = BehaviorState::Idle;
        self.target = Target::Point(point);
    }

    pub fn target_entity(&self) -> Option<hecs::Entity> {
        match self.target {
            Target::Agent(entity) => Some(entity),
            Target::Point(_) => None,
        }
    }
}

/// Resource budgets. Energy and food live in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    pub energy: f32,
    pub food: f32,
    /// Remaining lifespan in seconds.
    pub life: f32,
    /// Time until the agent may mate again.
    pub mating_cooldown: f32,
    /// Post-mating rest; no movement while positive.
    pub freeze: f32,
    pub dead: bool,
}

impl Vitals {
    pub fn new(food: f32, life: f32, mating_cooldown: f32) -> Self {
        Self {
            energy: 100.0,
            food,
            life,
            mating_cooldown,
            freeze: 0.0,
            dead: false,
        }
    }

    pub fn alive(&self) -> bool {
        !self.dead
    }
}

/// Heritable traits shared by both species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traits {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub weight: f32,
    /// Perception radius.
    pub alert_range: f32,
    /// Chance a mating check succeeds.
    pub mate_rate: f32,
    /// Cooldown applied after each successful mating.
    pub mate_gap: f32,
}

/// Predator-only traits. Presence of this component marks a predator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hunter {
    /// A pursuit is abandoned once the target is farther than this.
    pub quit_range: f32,
    /// Only hunts while food is below this.
    pub eat_threshold: f32,
    /// Becomes fair game for other predators while food is below this.
    pub rival_threshold: f32,
}

/// Prey-only traits. Presence of this component marks a prey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grazer {
    /// Fleeing stops once the threat is farther than this.
    pub safe_range: f32,
}

/// Same-species neighbors counted during the last crowding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crowding(pub u32);
