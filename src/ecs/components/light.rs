use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Number of discrete charge levels published for the status bar.
pub const STATUS_LEVELS: u8 = 6;

/// A battery-powered light an actor can carry and toggle.
#[derive(Component, Debug, Clone)]
pub struct HandheldLight {
    pub activated: bool,
    /// Charge drawn per second while lit.
    pub wattage: f32,
    /// Last published charge level; `None` while off.
    pub level: Option<u8>,
    pub turn_on_sound: String,
    pub turn_off_sound: String,
    pub turn_on_fail_sound: String,
}

impl Default for HandheldLight {
    fn default() -> Self {
        Self {
            activated: false,
            wattage: 0.8,
            level: None,
            turn_on_sound: "/Audio/Items/flashlight_on.ogg".to_string(),
            turn_off_sound: "/Audio/Items/flashlight_off.ogg".to_string(),
            turn_on_fail_sound: "/Audio/Machines/button.ogg".to_string(),
        }
    }
}

/// Light emitter attached to the same entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PointLight {
    pub enabled: bool,
}

/// Power band shown on the item sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightPowerState {
    FullPower,
    LowPower,
    Dying,
}

/// Visual state the client renders from.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Appearance {
    pub power: Option<LightPowerState>,
    pub light_enabled: bool,
}

/// Marks a light in the active set (updated every tick).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ActiveLight;

/// Replicated state of a handheld light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandheldLightState {
    pub activated: bool,
    pub level: Option<u8>,
}
