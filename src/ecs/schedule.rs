use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for the main simulation tick.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each simulation tick.
///
/// Systems are assigned to phases via `.in_set(SimPhase::Update)` etc.
/// Phases run in declaration order:
/// PreUpdate < Input < Update < Reactions < PostUpdate < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    /// Message buffer rotation.
    PreUpdate,
    /// Player interaction events (activate, use, toggle) are delivered.
    Input,
    /// Per-tick domain updates.
    Update,
    /// Engine events raised during `Update` (FTL lifecycle) are delivered.
    Reactions,
    /// Host commands are applied.
    PostUpdate,
    Last,
}

/// Per-domain system sets within `SimPhase::Update`.
///
/// ```text
/// Lights
/// Shuttles → Salvage
/// ```
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Lights,
    Shuttles,
    Salvage,
}

fn configure_domain_ordering(schedule: &mut Schedule) {
    schedule.configure_sets(DomainSet::Lights.in_set(SimPhase::Update));
    schedule.configure_sets(DomainSet::Shuttles.in_set(SimPhase::Update));
    schedule.configure_sets(DomainSet::Salvage.in_set(SimPhase::Update));

    // Shuttles move before the runner looks at who is still on a mission map.
    schedule.configure_sets(DomainSet::Salvage.after(DomainSet::Shuttles));
}

/// Build a configured `SimTick` schedule with phase ordering.
///
/// The simulation is a cooperative single-threaded loop; the executor is
/// always `SingleThreaded` so event delivery order is reproducible.
pub fn configure_sim_schedule() -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Input,
            SimPhase::Update,
            SimPhase::Reactions,
            SimPhase::PostUpdate,
            SimPhase::Last,
        )
            .chain(),
    );
    configure_domain_ordering(&mut schedule);
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}
