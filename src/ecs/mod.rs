pub mod app;
pub mod bus;
pub mod clock;
pub mod commands;
pub mod components;
pub mod conditions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;
pub mod time;

pub use app::build_sim_app;
pub use bus::{BusEvent, Listeners, SubscribeExt, dispatch_queued, queue_event, raise_now};
pub use clock::SimClock;
pub use commands::{HostCommand, SoundSource};
pub use components::{
    Actor, ActiveLight, Appearance, Battery, ExpeditionStage, Ftl, FtlDestination, FtlState,
    HandheldLight, HandheldLightState, LightPowerState, MapComponent, MapId, PlaySoundOnUse,
    PointLight, PowerCellSlot, PreventPilot, SalvageExpedition, SalvageExpeditionData,
    SalvageMiningExpedition, SalvageStructureExpedition, Shuttle, StationData, Transform,
};
pub use conditions::{any_active_lights, any_ftl_in_progress, any_open_expeditions};
pub use plugin::StationSimPlugin;
pub use resources::{HostLog, Localization, MapIndex, SimConfig};
pub use schedule::{DomainSet, SimPhase, SimTick, configure_sim_schedule};
pub use time::SimTime;
