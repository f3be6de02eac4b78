//! Handheld light system.
//!
//! Event listeners (SimPhase::Input):
//! - `ActivateInWorld`: toggle; claims the event only if the toggle worked
//! - `ToggleAction`: toggle; always claims the event
//! - `Examined`: on/off line
//! - `GetVerbs`: "Toggle light" activation verb
//!
//! One per-tick system (DomainSet::Lights):
//! - `update_handheld_lights`: power visual, battery drain, auto-off, status level

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::world::World;

use crate::ecs::bus::SubscribeExt;
use crate::ecs::clock::SimClock;
use crate::ecs::conditions::any_active_lights;
use crate::ecs::components::{
    ActiveLight, Appearance, Battery, HandheldLight, HandheldLightState, LightPowerState,
    PointLight, STATUS_LEVELS,
};
use crate::ecs::events::{ActivateInWorld, ActivationVerb, Examined, GetVerbs, ToggleAction, VerbAct};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::ecs::systems::helpers::{loc, mark_dirty, play_pvs, popup};
use crate::ecs::systems::power_cell;
use crate::math::{close_to, round_to_nearest_levels};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const FULL_POWER_FRACTION: f32 = 0.30;
const LOW_POWER_FRACTION: f32 = 0.10;

/// Scale the charge fraction is quantized over.
const LEVEL_SCALE: f64 = 255.0;

const TOGGLE_LIGHT_ICON: &str = "/Textures/Interface/VerbIcons/light.svg.192dpi.png";

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct HandheldLightPlugin;

impl Plugin for HandheldLightPlugin {
    fn build(&self, app: &mut App) {
        app.subscribe::<ActivateInWorld>("handheld_light", on_activate)
            .subscribe::<ToggleAction>("handheld_light", on_toggle_action)
            .subscribe::<Examined>("handheld_light", on_examine)
            .subscribe::<GetVerbs>("handheld_light", add_toggle_light_verb);
        app.add_systems(
            SimTick,
            update_handheld_lights
                .run_if(any_active_lights)
                .in_set(DomainSet::Lights),
        );
    }
}

// ---------------------------------------------------------------------------
// Pure rules
// ---------------------------------------------------------------------------

/// Sprite power band for a charge fraction.
pub fn power_state(fraction: f32) -> LightPowerState {
    if fraction >= FULL_POWER_FRACTION {
        LightPowerState::FullPower
    } else if fraction >= LOW_POWER_FRACTION {
        LightPowerState::LowPower
    } else {
        LightPowerState::Dying
    }
}

/// Status bar level for a battery feeding a light drawing `wattage`.
///
/// Zero when the battery is flat or cannot cover one second of draw,
/// otherwise the charge fraction rounded to the nearest of `STATUS_LEVELS`.
pub fn charge_level(battery: &Battery, wattage: f32) -> u8 {
    if close_to(battery.current_charge as f64, 0.0) || wattage > battery.current_charge {
        return 0;
    }
    let scaled = battery.fraction() as f64 * LEVEL_SCALE;
    round_to_nearest_levels(scaled, LEVEL_SCALE, STATUS_LEVELS)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Illuminate the light if it is off, extinguish it if it is on.
/// Returns whether the light's status changed.
pub fn toggle_status(world: &mut World, user: Entity, uid: Entity) -> bool {
    let activated = world
        .get::<HandheldLight>(uid)
        .is_some_and(|light| light.activated);
    if activated {
        turn_off(world, uid, true)
    } else {
        turn_on(world, user, uid)
    }
}

pub fn turn_on(world: &mut World, user: Entity, uid: Entity) -> bool {
    let Some(light) = world.get::<HandheldLight>(uid) else {
        return false;
    };
    if light.activated || world.get::<PointLight>(uid).is_none() {
        return false;
    }
    let wattage = light.wattage;
    let fail_sound = light.turn_on_fail_sound.clone();

    let Some(charge) = power_cell::try_get_battery(world, uid).map(|b| b.current_charge) else {
        play_pvs(world, fail_sound, uid);
        let text = loc(world, "handheld-light-component-cell-missing-message", &[]);
        popup(world, text, uid, user);
        return false;
    };

    // Require a whole second of charge so frame length never matters here.
    if wattage > charge {
        play_pvs(world, fail_sound, uid);
        let text = loc(world, "handheld-light-component-cell-dead-message", &[]);
        popup(world, text, uid, user);
        return false;
    }

    if let Some(mut point) = world.get_mut::<PointLight>(uid) {
        point.enabled = true;
    }
    set_activated(world, uid, true, true);
    world.entity_mut(uid).insert(ActiveLight);
    tracing::debug!("{uid:?} turned on by {user:?}");
    true
}

pub fn turn_off(world: &mut World, uid: Entity, make_noise: bool) -> bool {
    let activated = world
        .get::<HandheldLight>(uid)
        .is_some_and(|light| light.activated);
    if !activated {
        return false;
    }
    let Some(mut point) = world.get_mut::<PointLight>(uid) else {
        return false;
    };
    point.enabled = false;

    set_activated(world, uid, false, make_noise);
    if let Some(mut light) = world.get_mut::<HandheldLight>(uid) {
        light.level = None;
    }
    world.entity_mut(uid).remove::<ActiveLight>();
    tracing::debug!("{uid:?} turned off");
    true
}

/// Current status level, computed live from the battery.
/// `None` when the light has no battery at all.
pub fn get_level(world: &World, uid: Entity) -> Option<u8> {
    let light = world.get::<HandheldLight>(uid)?;
    let battery = power_cell::try_get_battery(world, uid)?;
    Some(charge_level(battery, light.wattage))
}

/// Replicated state snapshot sent to clients.
pub fn handheld_light_state(world: &World, uid: Entity) -> Option<HandheldLightState> {
    let light = world.get::<HandheldLight>(uid)?;
    Some(HandheldLightState {
        activated: light.activated,
        level: get_level(world, uid),
    })
}

fn set_activated(world: &mut World, uid: Entity, activated: bool, make_noise: bool) {
    let sound = {
        let Some(mut light) = world.get_mut::<HandheldLight>(uid) else {
            return;
        };
        if light.activated == activated {
            return;
        }
        light.activated = activated;
        if activated {
            light.turn_on_sound.clone()
        } else {
            light.turn_off_sound.clone()
        }
    };

    if let Some(mut appearance) = world.get_mut::<Appearance>(uid) {
        appearance.light_enabled = activated;
    }
    mark_dirty(world, uid);

    if make_noise {
        play_pvs(world, sound, uid);
    }
}

// ---------------------------------------------------------------------------
// Per-tick update
// ---------------------------------------------------------------------------

/// Exclusive system updating every light in the active set.
pub fn update_handheld_lights(world: &mut World) {
    let frame_time = world
        .get_resource::<SimClock>()
        .map(|clock| clock.frame_secs())
        .unwrap_or_default();

    let mut active = world.query_filtered::<Entity, With<ActiveLight>>();
    let lights: Vec<Entity> = active.iter(world).collect();

    for uid in lights {
        try_update(world, uid, frame_time);
    }
}

/// One tick for one light: visual band, drain, auto-off, level.
pub fn try_update(world: &mut World, uid: Entity, frame_time: f32) {
    let Some(source) = power_cell::battery_source(world, uid) else {
        turn_off(world, uid, false);
        return;
    };

    let fraction = world
        .get::<Battery>(source)
        .map(Battery::fraction)
        .unwrap_or_default();
    if let Some(mut appearance) = world.get_mut::<Appearance>(uid) {
        let band = Some(power_state(fraction));
        if appearance.power != band {
            appearance.power = band;
        }
    }

    let (activated, wattage) = world
        .get::<HandheldLight>(uid)
        .map(|light| (light.activated, light.wattage))
        .unwrap_or((false, 0.0));

    if activated {
        let drained = world
            .get_mut::<Battery>(source)
            .is_some_and(|mut battery| battery.try_use_charge(wattage * frame_time));
        if !drained {
            turn_off(world, uid, false);
        }
    }

    update_level(world, uid);
}

/// Publish the status level, dirtying only when it actually changed.
fn update_level(world: &mut World, uid: Entity) {
    let level = get_level(world, uid);
    {
        let Some(mut light) = world.get_mut::<HandheldLight>(uid) else {
            return;
        };
        if light.level == level {
            return;
        }
        light.level = level;
    }
    mark_dirty(world, uid);
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

fn on_activate(world: &mut World, ev: &mut ActivateInWorld) {
    if world.get::<HandheldLight>(ev.target).is_none() {
        return;
    }
    if toggle_status(world, ev.user, ev.target) {
        ev.handled = true;
    }
}

fn on_toggle_action(world: &mut World, ev: &mut ToggleAction) {
    let Some(activated) = world.get::<HandheldLight>(ev.target).map(|l| l.activated) else {
        return;
    };
    if activated {
        turn_off(world, ev.target, true);
    } else {
        turn_on(world, ev.performer, ev.target);
    }
    ev.handled = true;
}

fn on_examine(world: &mut World, ev: &mut Examined) {
    let Some(activated) = world.get::<HandheldLight>(ev.examined).map(|l| l.activated) else {
        return;
    };
    let key = if activated {
        "handheld-light-component-on-examine-is-on-message"
    } else {
        "handheld-light-component-on-examine-is-off-message"
    };
    let line = loc(world, key, &[]);
    ev.push_markup(line);
}

fn verb_turn_on(world: &mut World, user: Entity, uid: Entity) -> bool {
    turn_on(world, user, uid)
}

fn verb_turn_off(world: &mut World, _user: Entity, uid: Entity) -> bool {
    turn_off(world, uid, true)
}

fn add_toggle_light_verb(world: &mut World, ev: &mut GetVerbs) {
    if !ev.can_access || !ev.can_interact {
        return;
    }
    let Some(activated) = world.get::<HandheldLight>(ev.target).map(|l| l.activated) else {
        return;
    };

    let act: VerbAct = if activated { verb_turn_off } else { verb_turn_on };
    ev.verbs.push(ActivationVerb {
        text: loc(world, "verb-common-toggle-light", &[]),
        icon: TOGGLE_LIGHT_ICON.to_string(),
        user: ev.user,
        target: ev.target,
        act,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::app::build_sim_app;
    use crate::ecs::commands::apply_host_commands;
    use crate::ecs::components::PowerCellSlot;
    use crate::ecs::resources::{HostLog, Replication, SimConfig};
    use crate::ecs::test_helpers::tick;

    fn setup_app() -> App {
        let mut app = build_sim_app(SimConfig {
            tick_rate: 1,
            ..SimConfig::default()
        });
        app.add_plugins(HandheldLightPlugin);
        app
    }

    fn spawn_light(app: &mut App, wattage: f32, battery: Option<Battery>) -> Entity {
        let light = HandheldLight {
            wattage,
            ..HandheldLight::default()
        };
        let mut entity = app.world_mut().spawn((
            light,
            PointLight::default(),
            Appearance::default(),
            PowerCellSlot::default(),
        ));
        if let Some(battery) = battery {
            entity.insert(battery);
        }
        entity.id()
    }

    fn user(app: &mut App) -> Entity {
        app.world_mut().spawn_empty().id()
    }

    #[test]
    fn power_bands() {
        assert_eq!(power_state(1.0), LightPowerState::FullPower);
        assert_eq!(power_state(0.30), LightPowerState::FullPower);
        assert_eq!(power_state(0.29), LightPowerState::LowPower);
        assert_eq!(power_state(0.10), LightPowerState::LowPower);
        assert_eq!(power_state(0.09), LightPowerState::Dying);
        assert_eq!(power_state(0.0), LightPowerState::Dying);
    }

    #[test]
    fn level_is_zero_below_one_second_of_draw() {
        let battery = Battery::new(100.0).with_charge(0.5);
        assert_eq!(charge_level(&battery, 1.0), 0);
        let flat = Battery::new(100.0).with_charge(0.0);
        assert_eq!(charge_level(&flat, 0.0), 0);
    }

    #[test]
    fn level_tracks_fraction() {
        assert_eq!(charge_level(&Battery::new(100.0), 1.0), STATUS_LEVELS - 1);
        assert_eq!(charge_level(&Battery::new(100.0).with_charge(50.0), 1.0), 2);
        assert_eq!(charge_level(&Battery::new(100.0).with_charge(60.0), 1.0), 3);
    }

    #[test]
    fn level_is_monotonic_in_charge() {
        let mut last = 0;
        for charge in 0..=1000 {
            let battery = Battery::new(1000.0).with_charge(charge as f32);
            let level = charge_level(&battery, 3.0);
            assert!(level >= last, "level dropped at charge {charge}");
            last = level;
        }
    }

    #[test]
    fn turn_on_then_off_round_trips() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));

        assert!(turn_on(app.world_mut(), u, light));
        tick(&mut app, 1);
        let world = app.world_mut();
        assert!(world.get::<HandheldLight>(light).unwrap().activated);
        assert!(world.get::<PointLight>(light).unwrap().enabled);
        assert!(world.get::<ActiveLight>(light).is_some());
        assert_eq!(
            world.get::<HandheldLight>(light).unwrap().level,
            Some(STATUS_LEVELS - 1)
        );

        // Turning off drops the published level.
        assert!(turn_off(world, light, true));
        let state = world.get::<HandheldLight>(light).unwrap();
        assert!(!state.activated);
        assert_eq!(state.level, None);
        assert!(!world.get::<PointLight>(light).unwrap().enabled);
        assert!(world.get::<ActiveLight>(light).is_none());
    }

    #[test]
    fn dirty_set_is_handed_off_every_tick() {
        let mut app = setup_app();
        let u = user(&mut app);
        let lights: Vec<Entity> = (0..5)
            .map(|_| spawn_light(&mut app, 1.0, Some(Battery::new(100.0))))
            .collect();

        for &light in &lights {
            assert!(turn_on(app.world_mut(), u, light));
        }
        tick(&mut app, 1);
        for &light in &lights {
            assert!(turn_off(app.world_mut(), light, false));
            app.world_mut().despawn(light);
        }
        tick(&mut app, 1);

        let replication = app.world().resource::<Replication>();
        assert!(replication.dirty.is_empty());
        assert!(replication.dirty_marks >= 10);
    }

    #[test]
    fn second_turn_on_is_a_noop() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));
        let world = app.world_mut();

        assert!(turn_on(world, u, light));
        let marks = world.resource::<Replication>().dirty_marks;
        assert!(!turn_on(world, u, light));
        assert!(world.get::<HandheldLight>(light).unwrap().activated);
        assert_eq!(world.resource::<Replication>().dirty_marks, marks);
    }

    #[test]
    fn turn_off_when_off_fails() {
        let mut app = setup_app();
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));
        assert!(!turn_off(app.world_mut(), light, true));
    }

    #[test]
    fn missing_point_light_fails_silently() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = app
            .world_mut()
            .spawn((HandheldLight::default(), Battery::new(100.0)))
            .id();
        assert!(!turn_on(app.world_mut(), u, light));
        apply_host_commands(app.world_mut());
        let log = app.world().resource::<HostLog>();
        assert!(log.popups.is_empty());
        assert!(log.sounds.is_empty());
    }

    #[test]
    fn missing_cell_plays_fail_sound_and_popup() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, None);

        assert!(!turn_on(app.world_mut(), u, light));
        apply_host_commands(app.world_mut());

        let log = app.world().resource::<HostLog>();
        assert_eq!(log.popup_texts(), vec!["Missing power cell..."]);
        assert_eq!(log.popups[0].recipient, u.to_bits());
        assert_eq!(log.sounds_named("/Audio/Machines/button.ogg"), 1);
        assert!(!app.world().get::<HandheldLight>(light).unwrap().activated);
    }

    #[test]
    fn dead_cell_plays_fail_sound_and_popup() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 2.0, Some(Battery::new(100.0).with_charge(1.5)));

        assert!(!turn_on(app.world_mut(), u, light));
        apply_host_commands(app.world_mut());

        let log = app.world().resource::<HostLog>();
        assert_eq!(log.popup_texts(), vec!["Dead cell..."]);
        assert_eq!(log.sounds_named("/Audio/Machines/button.ogg"), 1);
    }

    #[test]
    fn toggle_sounds_follow_noise_flag() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));

        assert!(toggle_status(app.world_mut(), u, light));
        assert!(toggle_status(app.world_mut(), u, light));
        assert!(turn_on(app.world_mut(), u, light));
        assert!(turn_off(app.world_mut(), light, false));
        apply_host_commands(app.world_mut());

        let log = app.world().resource::<HostLog>();
        assert_eq!(log.sounds_named("/Audio/Items/flashlight_on.ogg"), 2);
        assert_eq!(log.sounds_named("/Audio/Items/flashlight_off.ogg"), 1);
    }

    #[test]
    fn lit_light_drains_each_tick() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));
        assert!(turn_on(app.world_mut(), u, light));

        tick(&mut app, 10);

        let battery = app.world().get::<Battery>(light).unwrap();
        assert_eq!(battery.current_charge, 90.0);
    }

    #[test]
    fn unlit_light_does_not_drain() {
        let mut app = setup_app();
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));
        tick(&mut app, 10);
        assert_eq!(app.world().get::<Battery>(light).unwrap().current_charge, 100.0);
    }

    #[test]
    fn flat_battery_turns_light_off_silently() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0).with_charge(3.0)));
        assert!(turn_on(app.world_mut(), u, light));

        tick(&mut app, 4);

        let world = app.world();
        let state = world.get::<HandheldLight>(light).unwrap();
        assert!(!state.activated);
        assert!(world.get::<ActiveLight>(light).is_none());
        assert!(!world.get::<PointLight>(light).unwrap().enabled);
        assert_eq!(state.level, Some(0));
        let log = world.resource::<HostLog>();
        assert_eq!(log.sounds_named("/Audio/Items/flashlight_off.ogg"), 0);
    }

    #[test]
    fn removed_cell_turns_light_off() {
        let mut app = setup_app();
        let u = user(&mut app);
        let cell = app.world_mut().spawn(Battery::new(100.0)).id();
        let light = spawn_light(&mut app, 1.0, None);
        assert!(power_cell::insert_cell(app.world_mut(), light, cell));
        assert!(turn_on(app.world_mut(), u, light));

        tick(&mut app, 1);
        assert!(app.world().get::<HandheldLight>(light).unwrap().activated);

        power_cell::eject_cell(app.world_mut(), light);
        tick(&mut app, 1);
        assert!(!app.world().get::<HandheldLight>(light).unwrap().activated);
    }

    #[test]
    fn level_changes_bound_dirty_marks() {
        let mut app = setup_app();
        let u = user(&mut app);
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0)));
        assert!(turn_on(app.world_mut(), u, light));
        let after_on = app.world().resource::<Replication>().dirty_marks;

        // 100 down to 91 stays within the top level band after the first publish.
        tick(&mut app, 9);
        let marks = app.world().resource::<Replication>().dirty_marks - after_on;
        assert_eq!(marks, 1, "only the first level publish should dirty");
        assert_eq!(
            app.world().get::<HandheldLight>(light).unwrap().level,
            Some(STATUS_LEVELS - 1)
        );
    }

    #[test]
    fn state_snapshot_reports_live_level() {
        let mut app = setup_app();
        let light = spawn_light(&mut app, 1.0, Some(Battery::new(100.0).with_charge(50.0)));
        let state = handheld_light_state(app.world(), light).unwrap();
        assert_eq!(
            state,
            HandheldLightState {
                activated: false,
                level: Some(2)
            }
        );

        let no_cell = spawn_light(&mut app, 1.0, None);
        assert_eq!(handheld_light_state(app.world(), no_cell).unwrap().level, None);
    }
}
