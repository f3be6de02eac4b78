use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

use crate::ecs::components::MapId;

/// Bidirectional mapping between host map ids and map root entities.
#[derive(Resource, Debug, Clone, Default)]
pub struct MapIndex {
    to_entity: BTreeMap<MapId, Entity>,
    to_map: BTreeMap<Entity, MapId>,
    next_id: u32,
}

impl MapIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next unused map id.
    pub fn allocate(&mut self) -> MapId {
        self.next_id += 1;
        MapId(self.next_id)
    }

    /// Insert a mapping. Panics if the map id is already registered.
    pub fn insert(&mut self, map_id: MapId, entity: Entity) {
        let prev = self.to_entity.insert(map_id, entity);
        assert!(prev.is_none(), "duplicate map id {map_id:?} in MapIndex");
        self.to_map.insert(entity, map_id);
        self.next_id = self.next_id.max(map_id.0);
    }

    /// Drop the mapping for a map root entity, if any.
    pub fn remove_entity(&mut self, entity: Entity) -> Option<MapId> {
        let map_id = self.to_map.remove(&entity)?;
        self.to_entity.remove(&map_id);
        Some(map_id)
    }

    /// Root entity of a map.
    pub fn get_map_entity(&self, map_id: MapId) -> Option<Entity> {
        self.to_entity.get(&map_id).copied()
    }

    pub fn get_map_id(&self, entity: Entity) -> Option<MapId> {
        self.to_map.get(&entity).copied()
    }

    pub fn len(&self) -> usize {
        self.to_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_entity.is_empty()
    }
}
