//! Synchronous request/response interactions: examine text and verb menus.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::bus::raise_now;
use crate::ecs::events::{ActivationVerb, Examined, GetVerbs};

/// Examine lines every listener contributes for `target`, in listener order.
pub fn examine(world: &mut World, examiner: Entity, target: Entity) -> Vec<String> {
    let mut ev = Examined {
        examiner,
        examined: target,
        markup: Vec::new(),
    };
    raise_now(world, &mut ev);
    ev.markup
}

/// Activation verbs `user` may run on `target`.
pub fn get_verbs(
    world: &mut World,
    user: Entity,
    target: Entity,
    can_access: bool,
    can_interact: bool,
) -> Vec<ActivationVerb> {
    let mut ev = GetVerbs {
        user,
        target,
        can_access,
        can_interact,
        verbs: Vec::new(),
    };
    raise_now(world, &mut ev);
    ev.verbs
}
