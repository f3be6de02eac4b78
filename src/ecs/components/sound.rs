use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Handle to a looping or long-running audio stream started by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioStream(pub u64);

/// Plays a sound at the item whenever it is used in hand.
#[derive(Component, Debug, Clone, Default)]
pub struct PlaySoundOnUse {
    pub sound: String,
}
