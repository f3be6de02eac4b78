use bevy_ecs::query::With;
use bevy_ecs::system::Query;

use super::components::{ActiveLight, Ftl, SalvageExpedition};

// Bevy run condition functions (for use with `.run_if()`).

pub fn any_active_lights(lights: Query<(), With<ActiveLight>>) -> bool {
    !lights.is_empty()
}

pub fn any_ftl_in_progress(jumps: Query<(), With<Ftl>>) -> bool {
    !jumps.is_empty()
}

pub fn any_open_expeditions(expeditions: Query<&SalvageExpedition>) -> bool {
    expeditions.iter().any(|exp| !exp.completed)
}
