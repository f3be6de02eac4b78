//! Play-sound-on-use: an item with `PlaySoundOnUse` plays its sound at
//! itself whenever it is used in hand.

use bevy_app::{App, Plugin};
use bevy_ecs::world::World;

use crate::ecs::bus::SubscribeExt;
use crate::ecs::components::PlaySoundOnUse;
use crate::ecs::events::UseInHand;
use crate::ecs::systems::helpers::play_pvs;

pub struct PlaySoundOnUsePlugin;

impl Plugin for PlaySoundOnUsePlugin {
    fn build(&self, app: &mut App) {
        app.subscribe::<UseInHand>("play_sound_on_use", on_use_in_hand);
    }
}

/// Does not claim the event; other use handlers still see it.
fn on_use_in_hand(world: &mut World, ev: &mut UseInHand) {
    let Some(sound) = world.get::<PlaySoundOnUse>(ev.item).map(|s| s.sound.clone()) else {
        return;
    };
    play_pvs(world, sound, ev.item);
}
