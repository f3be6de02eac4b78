pub mod host_log;
pub mod localization;
pub mod map_index;
pub mod sim_resources;

pub use host_log::{ChatRecord, HostLog, PopupRecord, SoundRecord, SoundScope};
pub use localization::Localization;
pub use map_index::MapIndex;
pub use sim_resources::{AudioStreams, Replication, SimConfig};
