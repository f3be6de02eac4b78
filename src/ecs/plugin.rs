use bevy_app::{App, Plugin};

use super::systems::light::HandheldLightPlugin;
use super::systems::salvage::SalvagePlugin;
use super::systems::shuttle::ShuttlePlugin;
use super::systems::sound::PlaySoundOnUsePlugin;

/// Aggregate plugin that installs every gameplay plugin.
pub struct StationSimPlugin;

impl Plugin for StationSimPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            HandheldLightPlugin,
            PlaySoundOnUsePlugin,
            ShuttlePlugin,
            SalvagePlugin,
        ));
    }
}
