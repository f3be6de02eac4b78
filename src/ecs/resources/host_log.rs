use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::ecs::components::{AudioStream, MapId};
use crate::ecs::time::SimTime;

/// A radio line delivered to players. Entities are stored as raw bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub time: SimTime,
    pub map_id: MapId,
    pub text: String,
    pub recipients: Vec<u64>,
}

/// A floating message shown to one player over an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupRecord {
    pub time: SimTime,
    pub text: String,
    pub source: u64,
    pub recipient: u64,
}

/// Who hears a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundScope {
    /// Players in view of the source entity.
    Pvs { source: u64 },
    /// Everyone on a map, regardless of position.
    Map { map_id: MapId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundRecord {
    pub time: SimTime,
    pub sound: String,
    pub scope: SoundScope,
    pub stream: Option<AudioStream>,
}

/// Accumulates player-facing output between flushes.
#[derive(Resource, Debug, Clone, Default)]
pub struct HostLog {
    pub chat: Vec<ChatRecord>,
    pub popups: Vec<PopupRecord>,
    pub sounds: Vec<SoundRecord>,
    pub console_refreshes: u32,
}

impl HostLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chat text in delivery order.
    pub fn chat_texts(&self) -> Vec<&str> {
        self.chat.iter().map(|c| c.text.as_str()).collect()
    }

    pub fn popup_texts(&self) -> Vec<&str> {
        self.popups.iter().map(|p| p.text.as_str()).collect()
    }

    pub fn sounds_named(&self, sound: &str) -> usize {
        self.sounds.iter().filter(|s| s.sound == sound).count()
    }

    pub fn clear(&mut self) {
        self.chat.clear();
        self.popups.clear();
        self.sounds.clear();
        self.console_refreshes = 0;
    }
}
