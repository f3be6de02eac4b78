pub mod helpers;
pub mod interaction;
pub mod light;
pub mod power_cell;
pub mod salvage;
pub mod shuttle;
pub mod sound;

pub use light::HandheldLightPlugin;
pub use salvage::SalvagePlugin;
pub use shuttle::ShuttlePlugin;
pub use sound::PlaySoundOnUsePlugin;
