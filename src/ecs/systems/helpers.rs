//! Shared helpers used across multiple ECS systems.

use std::fmt;

use bevy_ecs::entity::Entity;
use bevy_ecs::system::ResMut;
use bevy_ecs::world::World;

use crate::ecs::clock::SimClock;
use crate::ecs::commands::{HostCommand, SoundSource, write_command};
use crate::ecs::resources::{Localization, Replication};
use crate::ecs::time::SimTime;

/// Current round time, zero before the clock exists.
pub(crate) fn now(world: &World) -> SimTime {
    world
        .get_resource::<SimClock>()
        .map(|clock| clock.cur_time)
        .unwrap_or_default()
}

/// Format a localized message.
pub(crate) fn loc(world: &World, key: &str, args: &[(&str, &dyn fmt::Display)]) -> String {
    match world.get_resource::<Localization>() {
        Some(strings) => strings.get_string(key, args),
        None => key.to_string(),
    }
}

/// Positional sound heard by players in view of `source`.
pub(crate) fn play_pvs(world: &mut World, sound: impl Into<String>, source: Entity) {
    write_command(
        world,
        HostCommand::PlaySound {
            sound: sound.into(),
            source: SoundSource::Entity(source),
            stream: None,
        },
    );
}

/// Popup over `source`, shown only to `recipient`.
pub(crate) fn popup(world: &mut World, text: String, source: Entity, recipient: Entity) {
    write_command(
        world,
        HostCommand::Popup {
            text,
            source,
            recipient,
        },
    );
}

/// Radio broadcast to every player on the map rooted at `map_uid`.
pub(crate) fn announce(world: &mut World, map_uid: Entity, text: String) {
    write_command(world, HostCommand::Announce { map_uid, text });
}

/// Hand the tick's dirty set to the network layer. Runs in `SimPhase::Last`.
pub fn flush_replication(mut replication: ResMut<Replication>) {
    let dirty = replication.take_dirty();
    if !dirty.is_empty() {
        tracing::trace!("{} entities need a state sync", dirty.len());
    }
}

/// Flag an entity's replicated state for the next network flush.
pub(crate) fn mark_dirty(world: &mut World, entity: Entity) {
    if let Some(mut replication) = world.get_resource_mut::<Replication>() {
        replication.mark_dirty(entity);
    }
}
