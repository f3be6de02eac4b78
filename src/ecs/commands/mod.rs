pub mod applicator;
mod apply_lifecycle;
mod apply_output;

use bevy_ecs::entity::Entity;
use bevy_ecs::message::{Message, Messages};
use bevy_ecs::world::World;

use crate::ecs::components::AudioStream;

pub use applicator::apply_host_commands;

/// Where a sound is heard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSource {
    /// Positional, heard by players in view of the entity.
    Entity(Entity),
    /// Global to every player on the map rooted at this entity.
    Map(Entity),
}

/// A side effect requested from the host engine.
///
/// Gameplay code never talks to audio, chat, popups or the shuttle drive
/// directly. It writes these messages; the applicator in
/// `SimPhase::PostUpdate` carries them out and records player-facing output
/// in `HostLog`.
#[derive(Message, Clone, Debug)]
pub enum HostCommand {
    PlaySound {
        sound: String,
        source: SoundSource,
        stream: Option<AudioStream>,
    },
    StopSound {
        stream: AudioStream,
    },
    /// Show `text` over `source` to `recipient` only.
    Popup {
        text: String,
        source: Entity,
        recipient: Entity,
    },
    /// Radio broadcast to every player on a map.
    Announce {
        map_uid: Entity,
        text: String,
    },
    /// Order a shuttle to jump to `target`'s map after `spool_secs`.
    FtlTravel {
        shuttle: Entity,
        target: Entity,
        spool_secs: f32,
    },
    RefreshShuttleConsoles,
    /// Delete an entity; deleting a map root deletes everything on the map.
    Delete {
        entity: Entity,
    },
}

/// Queue a host command from code holding `&mut World`.
pub fn write_command(world: &mut World, command: HostCommand) {
    match world.get_resource_mut::<Messages<HostCommand>>() {
        Some(mut messages) => {
            messages.write(command);
        }
        None => tracing::warn!("host commands not registered; dropping {command:?}"),
    }
}
