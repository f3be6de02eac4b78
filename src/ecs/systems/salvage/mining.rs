//! Mining tax exemption.
//!
//! Whatever a crew brings along to a mining expedition is theirs already and
//! must not be counted as mined ore. The list is snapshotted once, when the
//! first shuttle departs for the mission, and then frozen.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{SalvageMiningExpedition, Transform};

/// The shuttle plus everything standing on its grid.
pub fn exempt_entities(world: &mut World, shuttle: Entity) -> Vec<Entity> {
    let mut placed = world.query::<(Entity, &Transform)>();
    let mut ents = vec![shuttle];
    ents.extend(
        placed
            .iter(world)
            .filter(|(e, xform)| *e != shuttle && xform.grid == Some(shuttle))
            .map(|(e, _)| e),
    );
    ents
}

/// Take the exemption snapshot for `map` if it is a mining expedition that
/// has none yet. Returns whether a snapshot was taken.
pub fn snapshot_exemptions(world: &mut World, map: Entity, shuttle: Entity) -> bool {
    let needs_snapshot = world
        .get::<SalvageMiningExpedition>(map)
        .is_some_and(|mining| mining.exempt_entities.is_none());
    if !needs_snapshot {
        return false;
    }

    let ents = exempt_entities(world, shuttle);
    tracing::debug!("{} entities exempt from mining tax on {map:?}", ents.len());
    if let Some(mut mining) = world.get_mut::<SalvageMiningExpedition>(map) {
        mining.exempt_entities = Some(ents);
    }
    true
}

/// Whether `entity` was brought along to the mining expedition on `map`.
pub fn is_exempt(world: &World, map: Entity, entity: Entity) -> bool {
    world
        .get::<SalvageMiningExpedition>(map)
        .and_then(|mining| mining.exempt_entities.as_ref())
        .is_some_and(|ents| ents.contains(&entity))
}
