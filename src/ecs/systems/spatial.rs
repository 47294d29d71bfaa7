use crate::ecs::components::{Hunter, Position, Species, Vitals};
use crate::spatial::{AgentSnapshot, SpatialGrid};

/// Rebuild the tile grid and snapshot cache from live agents.
pub fn rebuild(
    world: &hecs::World,
    grid: &mut SpatialGrid,
    snapshots: &mut Vec<AgentSnapshot>,
) {
    grid.clear();
    snapshots.clear();
    for (entity, (pos, vitals, hunter)) in world
        .query::<(&Position, &Vitals, Option<&Hunter>)>()
        .iter()
    {
        if vitals.dead {
            continue;
        }
        let idx = snapshots.len() as u32;
        snapshots.push(AgentSnapshot {
            entity,
            pos: pos.0,
            species: if hunter.is_some() {
                Species::Predator
            } else {
                Species::Prey
            },
        });
        grid.insert(pos.0, idx);
    }
}
