use bevy_ecs::message::Messages;
use bevy_ecs::world::World;

use crate::ecs::clock::SimClock;
use crate::ecs::resources::HostLog;
use crate::ecs::systems::shuttle::request_ftl;
use crate::ecs::time::SimTime;

use super::HostCommand;
use super::apply_lifecycle;
use super::apply_output;

/// Commands applied in one pass may queue follow-ups (a deleted map stops its
/// music); those are applied in further passes, up to this bound.
const MAX_PASSES: usize = 8;

/// Context passed to the `apply_*` output functions, holding the log taken
/// out of the world for the duration of a pass.
pub(crate) struct ApplyCtx {
    pub log: HostLog,
    pub now: SimTime,
}

/// Exclusive system that drains all pending `HostCommand` messages, performs
/// the world mutations they ask for, and records player-facing output in
/// `HostLog`.
///
/// Runs in `SimPhase::PostUpdate`.
pub fn apply_host_commands(world: &mut World) {
    for _ in 0..MAX_PASSES {
        let commands: Vec<HostCommand> = {
            let Some(mut messages) = world.get_resource_mut::<Messages<HostCommand>>() else {
                return;
            };
            messages.drain().collect()
        };

        if commands.is_empty() {
            return;
        }

        apply_pass(world, commands);
    }

    tracing::warn!("host commands still pending after {MAX_PASSES} passes");
}

fn apply_pass(world: &mut World, commands: Vec<HostCommand>) {
    let now = world
        .get_resource::<SimClock>()
        .map(|clock| clock.cur_time)
        .unwrap_or_default();
    let log = world.remove_resource::<HostLog>().unwrap_or_default();

    let mut ctx = ApplyCtx { log, now };

    for command in commands {
        match command {
            // Output
            HostCommand::PlaySound {
                sound,
                source,
                stream,
            } => {
                apply_output::apply_play_sound(&mut ctx, world, sound, source, stream);
            }
            HostCommand::StopSound { stream } => {
                apply_output::apply_stop_sound(world, stream);
            }
            HostCommand::Popup {
                text,
                source,
                recipient,
            } => {
                apply_output::apply_popup(&mut ctx, text, source, recipient);
            }
            HostCommand::Announce { map_uid, text } => {
                apply_output::apply_announce(&mut ctx, world, map_uid, text);
            }

            // Shuttles
            HostCommand::FtlTravel {
                shuttle,
                target,
                spool_secs,
            } => {
                let spool = SimTime::from_secs_f32(spool_secs);
                if !request_ftl(world, shuttle, target, spool) {
                    tracing::debug!("engine FTL order for {shuttle:?} was not started");
                }
            }
            HostCommand::RefreshShuttleConsoles => {
                ctx.log.console_refreshes += 1;
                tracing::debug!("shuttle consoles refreshed");
            }

            // Lifecycle
            HostCommand::Delete { entity } => {
                apply_lifecycle::apply_delete(world, entity);
            }
        }
    }

    world.insert_resource(ctx.log);
}
