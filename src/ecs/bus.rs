//! Ordered, explicitly registered event listeners.
//!
//! Every engine event type is a bevy `Message` that also implements
//! [`BusEvent`]. Systems subscribe a plain function per event type; delivery
//! walks the registration table in subscription order and stops as soon as a
//! listener marks the event handled.
//!
//! Two delivery modes:
//! - [`raise_now`] delivers synchronously by reference (request/response
//!   events such as examine or verb collection).
//! - [`queue_event`] buffers the event; the exclusive [`dispatch_queued`]
//!   system drains and delivers it during its schedule phase.

use bevy_app::App;
use bevy_ecs::message::{Message, MessageRegistry, Messages};
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;

/// An event deliverable through the listener table.
pub trait BusEvent: Message {
    fn handled(&self) -> bool {
        false
    }

    fn set_handled(&mut self) {}
}

/// Listener signature: full world access plus the event by reference.
pub type Handler<E> = fn(&mut World, &mut E);

pub struct Listener<E> {
    pub name: &'static str,
    pub handler: Handler<E>,
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Listener<E> {}

/// Registration table for one event type.
#[derive(Resource)]
pub struct Listeners<E: BusEvent> {
    entries: Vec<Listener<E>>,
}

impl<E: BusEvent> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: BusEvent> Listeners<E> {
    /// Append a listener. A second subscription under the same name is ignored.
    pub fn subscribe(&mut self, name: &'static str, handler: Handler<E>) {
        if self.entries.iter().any(|l| l.name == name) {
            tracing::warn!(
                "duplicate subscription '{name}' for {}",
                std::any::type_name::<E>()
            );
            return;
        }
        self.entries.push(Listener { name, handler });
    }

    /// Listener names in delivery order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|l| l.name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Register the message buffer and an empty listener table for `E`.
/// Idempotent.
pub fn register_event<E: BusEvent>(world: &mut World) {
    if world.contains_resource::<Listeners<E>>() {
        return;
    }
    MessageRegistry::register_message::<E>(world);
    world.insert_resource(Listeners::<E>::default());
}

/// Deliver `event` to every listener in order, stopping once it is handled.
pub fn raise_now<E: BusEvent>(world: &mut World, event: &mut E) {
    // Listeners may subscribe or raise other events; iterate over a snapshot.
    let entries: Vec<Listener<E>> = match world.get_resource::<Listeners<E>>() {
        Some(listeners) => listeners.entries.clone(),
        None => return,
    };

    for listener in entries {
        if event.handled() {
            break;
        }
        (listener.handler)(world, event);
    }
}

/// Buffer `event` for delivery by [`dispatch_queued`].
pub fn queue_event<E: BusEvent>(world: &mut World, event: E) {
    match world.get_resource_mut::<Messages<E>>() {
        Some(mut messages) => {
            messages.write(event);
        }
        None => {
            tracing::warn!(
                "queued {} before it was registered; dropping",
                std::any::type_name::<E>()
            );
        }
    }
}

/// Exclusive system that drains all queued `E` events and delivers each one.
pub fn dispatch_queued<E: BusEvent>(world: &mut World) {
    let pending: Vec<E> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<E>>() else {
            return;
        };
        messages.drain().collect()
    };

    for mut event in pending {
        raise_now(world, &mut event);
    }
}

/// `App` extension for explicit listener registration.
pub trait SubscribeExt {
    fn subscribe<E: BusEvent>(&mut self, name: &'static str, handler: Handler<E>) -> &mut Self;
}

impl SubscribeExt for App {
    fn subscribe<E: BusEvent>(&mut self, name: &'static str, handler: Handler<E>) -> &mut Self {
        let world = self.world_mut();
        register_event::<E>(world);
        world.resource_mut::<Listeners<E>>().subscribe(name, handler);
        self
    }
}
