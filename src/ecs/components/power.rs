use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

/// Stored energy on a cell or a device with a built-in battery.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Battery {
    pub current_charge: f32,
    pub max_charge: f32,
}

impl Battery {
    pub fn new(max_charge: f32) -> Self {
        Self {
            current_charge: max_charge,
            max_charge,
        }
    }

    pub fn with_charge(mut self, current_charge: f32) -> Self {
        self.current_charge = current_charge.clamp(0.0, self.max_charge);
        self
    }

    /// Charge as a fraction of capacity. Zero-capacity batteries read as empty.
    pub fn fraction(&self) -> f32 {
        if self.max_charge <= 0.0 {
            return 0.0;
        }
        self.current_charge / self.max_charge
    }

    /// Consume `amount` if the battery holds at least that much.
    /// Leaves the charge untouched and returns false otherwise.
    pub fn try_use_charge(&mut self, amount: f32) -> bool {
        if amount > self.current_charge {
            return false;
        }
        self.current_charge -= amount;
        true
    }
}

/// Item slot holding a removable power cell.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PowerCellSlot {
    pub cell: Option<Entity>,
}
