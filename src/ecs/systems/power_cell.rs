//! Power cell lookups shared by powered devices.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{Battery, PowerCellSlot};

/// Entity holding the battery that powers `device`: the cell in its slot if
/// one is inserted, otherwise the device itself when it has a built-in
/// battery.
pub fn battery_source(world: &World, device: Entity) -> Option<Entity> {
    let slotted = world
        .get::<PowerCellSlot>(device)
        .and_then(|slot| slot.cell)
        .filter(|cell| world.get::<Battery>(*cell).is_some());

    slotted.or_else(|| world.get::<Battery>(device).map(|_| device))
}

/// Battery powering `device`, if any.
pub fn try_get_battery(world: &World, device: Entity) -> Option<&Battery> {
    battery_source(world, device).and_then(|source| world.get::<Battery>(source))
}

/// Put `cell` into the device's empty slot. Returns false if the device has
/// no slot, the slot is occupied, or `cell` is not a battery.
pub fn insert_cell(world: &mut World, device: Entity, cell: Entity) -> bool {
    if world.get::<Battery>(cell).is_none() {
        return false;
    }
    let Some(mut slot) = world.get_mut::<PowerCellSlot>(device) else {
        return false;
    };
    if slot.cell.is_some() {
        return false;
    }
    slot.cell = Some(cell);
    true
}

/// Remove and return the slotted cell.
pub fn eject_cell(world: &mut World, device: Entity) -> Option<Entity> {
    world.get_mut::<PowerCellSlot>(device)?.cell.take()
}
