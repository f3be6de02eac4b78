use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::bus::raise_now;
use crate::ecs::components::{MapComponent, Transform};
use crate::ecs::events::EntityTerminating;
use crate::ecs::resources::MapIndex;

/// Delete an entity. A map root takes everything on the map with it.
/// Each doomed entity gets an `EntityTerminating` event before it goes.
pub(crate) fn apply_delete(world: &mut World, entity: Entity) {
    if world.get_entity(entity).is_err() {
        tracing::debug!("delete of {entity:?}, which is already gone");
        return;
    }

    let mut doomed = Vec::new();
    if world.get::<MapComponent>(entity).is_some() {
        let mut placed = world.query::<(Entity, &Transform)>();
        doomed.extend(
            placed
                .iter(world)
                .filter(|(e, xform)| *e != entity && xform.map_uid == Some(entity))
                .map(|(e, _)| e),
        );
    }
    // Contents first, the map root last.
    doomed.push(entity);

    for e in doomed {
        if world.get_entity(e).is_err() {
            continue;
        }
        raise_now(world, &mut EntityTerminating { entity: e });
        world.despawn(e);
    }

    let removed = world
        .get_resource_mut::<MapIndex>()
        .and_then(|mut index| index.remove_entity(entity));
    if let Some(map_id) = removed {
        tracing::debug!("map {} deleted", map_id.0);
    }
}
