pub mod common;
pub mod light;
pub mod power;
pub mod salvage;
pub mod shuttle;
pub mod sound;

pub use common::{Actor, MapComponent, MapId, StationData, Transform};
pub use light::{
    ActiveLight, Appearance, HandheldLight, HandheldLightState, LightPowerState, PointLight,
    STATUS_LEVELS,
};
pub use power::{Battery, PowerCellSlot};
pub use salvage::{
    ExpeditionStage, SalvageExpedition, SalvageExpeditionData, SalvageMiningExpedition,
    SalvageStructureExpedition,
};
pub use shuttle::{Ftl, FtlDestination, FtlState, PreventPilot, Shuttle};
pub use sound::{AudioStream, PlaySoundOnUse};
