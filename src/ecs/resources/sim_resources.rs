use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use serde::Deserialize;

use crate::ecs::components::AudioStream;

/// Simulation configuration (tick rate, FTL timings, output settings).
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Default FTL spool-up time in seconds.
    pub ftl_startup_time: f32,
    /// Time spent in hyperspace in seconds.
    pub ftl_travel_time: f32,
    pub output_dir: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 30,
            ftl_startup_time: 5.5,
            ftl_travel_time: 20.0,
            output_dir: "output".to_string(),
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Allocates audio stream handles and tracks which are still playing.
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioStreams {
    next: u64,
    playing: BTreeSet<AudioStream>,
}

impl AudioStreams {
    pub fn allocate(&mut self) -> AudioStream {
        self.next += 1;
        AudioStream(self.next)
    }

    pub fn start(&mut self, stream: AudioStream) {
        self.playing.insert(stream);
    }

    pub fn stop(&mut self, stream: AudioStream) -> bool {
        self.playing.remove(&stream)
    }

    pub fn is_playing(&self, stream: AudioStream) -> bool {
        self.playing.contains(&stream)
    }
}

/// Entities whose replicated state changed since the last network flush.
#[derive(Resource, Debug, Clone, Default)]
pub struct Replication {
    pub dirty: BTreeSet<Entity>,
    /// Total dirty marks ever made; lets tests count state-sync traffic.
    pub dirty_marks: u64,
}

impl Replication {
    pub fn mark_dirty(&mut self, entity: Entity) {
        self.dirty.insert(entity);
        self.dirty_marks += 1;
    }

    /// Take the dirty set, as the network layer does once per tick.
    pub fn take_dirty(&mut self) -> BTreeSet<Entity> {
        std::mem::take(&mut self.dirty)
    }
}
