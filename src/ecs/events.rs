use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;
use bevy_ecs::world::World;

use super::bus::BusEvent;

macro_rules! handled_event {
    ($name:ident) => {
        impl BusEvent for $name {
            fn handled(&self) -> bool {
                self.handled
            }

            fn set_handled(&mut self) {
                self.handled = true;
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Player interactions (queued, delivered in SimPhase::Input)
// ---------------------------------------------------------------------------

/// A player activated an entity in the world (the "use" key on a target).
#[derive(Message, Clone, Debug)]
pub struct ActivateInWorld {
    pub user: Entity,
    pub target: Entity,
    pub handled: bool,
}

impl ActivateInWorld {
    pub fn new(user: Entity, target: Entity) -> Self {
        Self {
            user,
            target,
            handled: false,
        }
    }
}

handled_event!(ActivateInWorld);

/// A toggle action bound to an item was performed from the action bar.
#[derive(Message, Clone, Debug)]
pub struct ToggleAction {
    pub performer: Entity,
    pub target: Entity,
    pub handled: bool,
}

impl ToggleAction {
    pub fn new(performer: Entity, target: Entity) -> Self {
        Self {
            performer,
            target,
            handled: false,
        }
    }
}

handled_event!(ToggleAction);

/// A player used the item held in their active hand.
#[derive(Message, Clone, Debug)]
pub struct UseInHand {
    pub user: Entity,
    pub item: Entity,
    pub handled: bool,
}

impl UseInHand {
    pub fn new(user: Entity, item: Entity) -> Self {
        Self {
            user,
            item,
            handled: false,
        }
    }
}

handled_event!(UseInHand);

// ---------------------------------------------------------------------------
// Request/response events (raised synchronously)
// ---------------------------------------------------------------------------

/// Collects examine text for an entity. Listeners push markup lines.
#[derive(Message, Clone, Debug)]
pub struct Examined {
    pub examiner: Entity,
    pub examined: Entity,
    pub markup: Vec<String>,
}

impl Examined {
    pub fn push_markup(&mut self, line: impl Into<String>) {
        self.markup.push(line.into());
    }
}

impl BusEvent for Examined {}

/// Action run when an activation verb is picked.
pub type VerbAct = fn(&mut World, Entity, Entity) -> bool;

/// A context-menu entry offered to a user for a target.
#[derive(Clone)]
pub struct ActivationVerb {
    pub text: String,
    pub icon: String,
    pub user: Entity,
    pub target: Entity,
    pub act: VerbAct,
}

impl ActivationVerb {
    /// Run the verb's action. Returns what the action reported.
    pub fn execute(&self, world: &mut World) -> bool {
        (self.act)(world, self.user, self.target)
    }
}

impl std::fmt::Debug for ActivationVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationVerb")
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("user", &self.user)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Collects activation verbs a user may run on a target.
#[derive(Message, Clone, Debug)]
pub struct GetVerbs {
    pub user: Entity,
    pub target: Entity,
    pub can_access: bool,
    pub can_interact: bool,
    pub verbs: Vec<ActivationVerb>,
}

impl BusEvent for GetVerbs {}

// ---------------------------------------------------------------------------
// Entity lifecycle
// ---------------------------------------------------------------------------

/// Raised immediately before an entity is despawned by the host.
#[derive(Message, Clone, Debug)]
pub struct EntityTerminating {
    pub entity: Entity,
}

impl BusEvent for EntityTerminating {}

// ---------------------------------------------------------------------------
// Shuttle FTL lifecycle (queued, delivered in SimPhase::Reactions)
// ---------------------------------------------------------------------------

/// An FTL jump toward `map_uid` was requested for a shuttle.
#[derive(Message, Clone, Debug)]
pub struct FtlRequest {
    pub entity: Entity,
    pub map_uid: Entity,
}

impl BusEvent for FtlRequest {}

/// A shuttle finished spooling and left `from_map_uid`.
#[derive(Message, Clone, Debug)]
pub struct FtlStarted {
    pub entity: Entity,
    pub from_map_uid: Option<Entity>,
    pub target_map_uid: Entity,
}

impl BusEvent for FtlStarted {}

/// A shuttle arrived on `map_uid`.
#[derive(Message, Clone, Debug)]
pub struct FtlCompleted {
    pub entity: Entity,
    pub map_uid: Entity,
}

impl BusEvent for FtlCompleted {}
