use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;

use crate::ecs::components::{Actor, AudioStream, MapComponent, Transform};
use crate::ecs::resources::{
    AudioStreams, ChatRecord, PopupRecord, SoundRecord, SoundScope,
};

use super::SoundSource;
use super::applicator::ApplyCtx;

pub(crate) fn apply_play_sound(
    ctx: &mut ApplyCtx,
    world: &mut World,
    sound: String,
    source: SoundSource,
    stream: Option<AudioStream>,
) {
    let scope = match source {
        SoundSource::Entity(entity) => SoundScope::Pvs {
            source: entity.to_bits(),
        },
        SoundSource::Map(map_uid) => {
            let Some(map) = world.get::<MapComponent>(map_uid) else {
                tracing::warn!("global sound {sound} for {map_uid:?}, which is not a map");
                return;
            };
            SoundScope::Map { map_id: map.map_id }
        }
    };

    if let Some(stream) = stream {
        if let Some(mut streams) = world.get_resource_mut::<AudioStreams>() {
            streams.start(stream);
        }
    }

    ctx.log.sounds.push(SoundRecord {
        time: ctx.now,
        sound,
        scope,
        stream,
    });
}

pub(crate) fn apply_stop_sound(world: &mut World, stream: AudioStream) {
    let Some(mut streams) = world.get_resource_mut::<AudioStreams>() else {
        return;
    };
    if !streams.stop(stream) {
        tracing::debug!("stopping {stream:?}, which was not playing");
    }
}

pub(crate) fn apply_popup(ctx: &mut ApplyCtx, text: String, source: Entity, recipient: Entity) {
    ctx.log.popups.push(PopupRecord {
        time: ctx.now,
        text,
        source: source.to_bits(),
        recipient: recipient.to_bits(),
    });
}

/// Radio broadcast to every player standing on the map.
pub(crate) fn apply_announce(ctx: &mut ApplyCtx, world: &mut World, map_uid: Entity, text: String) {
    let Some(map_id) = world.get::<MapComponent>(map_uid).map(|m| m.map_id) else {
        tracing::warn!("announcement for {map_uid:?}, which is not a map: {text}");
        return;
    };

    let mut actors = world.query_filtered::<(Entity, &Transform), With<Actor>>();
    let recipients: Vec<u64> = actors
        .iter(world)
        .filter(|(_, xform)| xform.map_uid == Some(map_uid))
        .map(|(entity, _)| entity.to_bits())
        .collect();

    tracing::info!(map = map_id.0, recipients = recipients.len(), "{text}");

    ctx.log.chat.push(ChatRecord {
        time: ctx.now,
        map_id,
        text,
        recipients,
    });
}
