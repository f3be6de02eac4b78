//! Salvage expeditions: timed missions on their own map.
//!
//! Event listeners (SimPhase::Reactions):
//! - `FtlRequest`: one shuttle per expedition (disable the destination)
//! - `FtlCompleted`: first arrival starts the mission
//! - `FtlStarted`: mining exemption snapshot; last shuttle out ends the mission
//! - `EntityTerminating`: stop music and update station bookkeeping
//!
//! Per-tick systems (DomainSet::Salvage):
//! - `update_runner`: countdown stages, music, auto-recall of shuttles
//! - `update_structures`: structure objectives

pub mod mining;
mod runner;

use bevy_app::{App, Plugin};
use bevy_ecs::schedule::IntoScheduleConfigs;

use crate::ecs::bus::SubscribeExt;
use crate::ecs::conditions::any_open_expeditions;
use crate::ecs::events::{EntityTerminating, FtlCompleted, FtlRequest, FtlStarted};
use crate::ecs::schedule::{DomainSet, SimTick};

pub use runner::{
    COUNTDOWN, FINAL_COUNTDOWN, FTL_MARGIN, MUSIC_COUNTDOWN, recall_spool_secs,
    update_runner, update_structures,
};

pub struct SalvagePlugin;

impl Plugin for SalvagePlugin {
    fn build(&self, app: &mut App) {
        app.subscribe::<FtlRequest>("salvage", runner::on_ftl_request)
            .subscribe::<FtlStarted>("salvage", runner::on_ftl_started)
            .subscribe::<FtlCompleted>("salvage", runner::on_ftl_completed)
            .subscribe::<EntityTerminating>("salvage", runner::on_expedition_terminating);
        app.add_systems(
            SimTick,
            (update_runner, update_structures)
                .chain()
                .run_if(any_open_expeditions)
                .in_set(DomainSet::Salvage),
        );
    }
}
