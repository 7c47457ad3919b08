//! Player domain: bus handlers that drive the action machine of the active character.
//!
//! Every handler looks the active character up again, so a switch earlier in the same
//! dispatch is always respected. Missing entities or content turn the event into a no-op.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::areas::{AreaTuning, spawn_broom};
use crate::combat::{Aim, Emitter, Health, Mana, Team};
use crate::content::{ContentRegistry, ItemEffect};
use crate::core::{GameEvent, ResourceChange, publish};
use crate::movement::{Facing, MovementTuning};
use crate::player::party::{Downed, Party, PlayerCharacter};
use crate::player::state::PlayerActions;

/// The active character, unless it is down.
fn active_player(world: &World) -> Option<Entity> {
    let player = world.get_resource::<Party>()?.active()?;
    world.get::<Downed>(player).is_none().then_some(player)
}

fn movement_tuning(world: &World) -> MovementTuning {
    world
        .get_resource::<MovementTuning>()
        .cloned()
        .unwrap_or_default()
}

fn velocity_of(world: &World, entity: Entity) -> Vec2 {
    world
        .get::<LinearVelocity>(entity)
        .map(|v| v.0)
        .unwrap_or(Vec2::ZERO)
}

fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
    if let Some(mut current) = world.get_mut::<LinearVelocity>(entity) {
        current.0 = velocity;
    }
}

fn press(world: &mut World, facing: Facing) {
    let Some(player) = active_player(world) else {
        return;
    };
    if let Some(mut actions) = world.get_mut::<PlayerActions>(player) {
        actions.press_direction(facing);
    }
    if let Some(mut current) = world.get_mut::<Facing>(player) {
        *current = facing;
    }
}

/// `left_key_pressed`
pub(crate) fn on_left_key(world: &mut World, _event: &GameEvent) {
    press(world, Facing::Left);
}

/// `right_key_pressed`
pub(crate) fn on_right_key(world: &mut World, _event: &GameEvent) {
    press(world, Facing::Right);
}

/// `motion_key_released`
pub(crate) fn on_motion_released(world: &mut World, _event: &GameEvent) {
    let Some(player) = active_player(world) else {
        return;
    };
    let tuning = movement_tuning(world);
    let velocity = velocity_of(world, player);
    let Some(mut actions) = world.get_mut::<PlayerActions>(player) else {
        return;
    };
    let velocity = actions.release_direction(velocity, &tuning);
    set_velocity(world, player, velocity);
}

/// `jump_key_pressed`
pub(crate) fn on_jump_key(world: &mut World, _event: &GameEvent) {
    let Some(player) = active_player(world) else {
        return;
    };
    let tuning = movement_tuning(world);
    let velocity = velocity_of(world, player);
    let animation_time = world
        .get::<PlayerCharacter>(player)
        .map_or(0.0, |c| c.jump_animation_time);
    let Some(mut actions) = world.get_mut::<PlayerActions>(player) else {
        return;
    };
    let result = actions.try_jump(velocity, &tuning, animation_time);
    let state = actions.state();
    match result {
        Some(velocity) => set_velocity(world, player, velocity),
        None => debug!("Jump refused in {:?}", state),
    }
}

/// `dash_key_pressed`
pub(crate) fn on_dash_key(world: &mut World, _event: &GameEvent) {
    let Some(player) = active_player(world) else {
        return;
    };
    let tuning = movement_tuning(world);
    let velocity = velocity_of(world, player);
    let animation_time = world
        .get::<PlayerCharacter>(player)
        .map_or(0.0, |c| c.dash_animation_time);
    let Some(mut actions) = world.get_mut::<PlayerActions>(player) else {
        return;
    };
    let result = actions.try_dash(velocity, &tuning, animation_time);
    let state = actions.state();
    match result {
        Some(velocity) => set_velocity(world, player, velocity),
        None => debug!("Dash refused in {:?}", state),
    }
}

/// `switch_attack_type`
pub(crate) fn on_switch_attack_type(world: &mut World, _event: &GameEvent) {
    let Some(player) = active_player(world) else {
        return;
    };
    let Some(mut actions) = world.get_mut::<PlayerActions>(player) else {
        return;
    };
    if let Some(slot) = actions.switch_attack_type() {
        debug!("Attack type -> '{}'", slot.id);
    }
}

/// `switch_character`: the incoming character takes over the outgoing one's body state.
pub(crate) fn on_switch_character(world: &mut World, _event: &GameEvent) {
    let Some((outgoing, incoming)) = world.get_resource::<Party>().and_then(Party::next_pair)
    else {
        return;
    };
    match world.get_entity(incoming) {
        Ok(entity) if entity.contains::<Downed>() => {
            debug!("Switch refused: {:?} is down", incoming);
            return;
        }
        Ok(_) => {}
        Err(_) => return,
    }

    let velocity = velocity_of(world, outgoing);
    let translation = world.get::<Transform>(outgoing).map(|t| t.translation);
    let facing = world
        .get::<PlayerActions>(outgoing)
        .map(PlayerActions::facing)
        .unwrap_or_default();

    if let Ok(mut benched) = world.get_entity_mut(outgoing) {
        if let Some(mut actions) = benched.get_mut::<PlayerActions>() {
            actions.bench();
        }
        benched.insert((RigidBodyDisabled, ColliderDisabled, Visibility::Hidden));
    }

    if let Ok(mut active) = world.get_entity_mut(incoming) {
        active.remove::<(RigidBodyDisabled, ColliderDisabled)>();
        active.insert((Visibility::Inherited, facing, LinearVelocity(velocity)));
        if let (Some(translation), Some(mut transform)) =
            (translation, active.get_mut::<Transform>())
        {
            transform.translation = translation;
        }
        if let Some(mut actions) = active.get_mut::<PlayerActions>() {
            actions.take_over(facing);
        }
    }

    if let Some(mut party) = world.get_resource_mut::<Party>() {
        party.advance();
    }
    info!("Switched character {:?} -> {:?}", outgoing, incoming);
}

/// `use_item`
pub(crate) fn on_use_item(world: &mut World, event: &GameEvent) {
    let GameEvent::UseItem { item_id } = event else {
        return;
    };
    let Some(player) = active_player(world) else {
        return;
    };
    let Some(effect) = world
        .get_resource::<ContentRegistry>()
        .and_then(|r| r.items.get(item_id))
        .map(|item| item.effect.clone())
    else {
        debug!("Unknown item '{}'", item_id);
        return;
    };

    match effect {
        ItemEffect::HpDelta(amount) => publish(
            world,
            GameEvent::HpChange(ResourceChange {
                target: player,
                amount,
            }),
        ),
        ItemEffect::ManaDelta(amount) => publish(
            world,
            GameEvent::ManaChange(ResourceChange {
                target: player,
                amount,
            }),
        ),
        ItemEffect::ThrowBroom { speed, width } => {
            let Some(position) = world.get::<Transform>(player).map(|t| t.translation.truncate())
            else {
                return;
            };
            let facing = world.get::<Facing>(player).copied().unwrap_or_default();
            let tuning = world
                .get_resource::<AreaTuning>()
                .cloned()
                .unwrap_or_default();
            spawn_broom(world, position, facing, speed, width, &tuning);
        }
    }
}

/// `use_spell_card`: pay mana, lock the action machine, and start the card's emitter.
pub(crate) fn on_use_spell_card(world: &mut World, event: &GameEvent) {
    let GameEvent::UseSpellCard { card_id } = event else {
        return;
    };
    let Some(player) = active_player(world) else {
        return;
    };
    let Some(card) = world
        .get_resource::<ContentRegistry>()
        .and_then(|r| r.spell_cards.get(card_id))
        .cloned()
    else {
        debug!("Unknown spell card '{}'", card_id);
        return;
    };

    let has_mana = world.get::<Mana>(player).is_some_and(|m| !m.is_empty());
    let can_cast = world
        .get::<PlayerActions>(player)
        .is_some_and(PlayerActions::can_cast);
    if !has_mana || !can_cast {
        debug!("Spell card '{}' refused", card_id);
        return;
    }

    let mut style = card.style;
    style.team = Team::Player;
    style.volleys = style.volleys.max(1);
    let duration = Emitter::duration(&style).unwrap_or(style.interval);

    publish(
        world,
        GameEvent::ManaChange(ResourceChange {
            target: player,
            amount: -card.mana_cost,
        }),
    );
    if let Some(mut actions) = world.get_mut::<PlayerActions>(player) {
        actions.begin_spell_card(duration);
    }
    world.spawn((
        Emitter::new(style, Aim::OwnerFacing(player)),
        Transform::default(),
        ChildOf(player),
    ));
    info!("Spell card '{}' for {:.2}s", card.name, duration);
}

/// `hp_change` on a character: damage interrupts the current action, and reaching
/// zero HP knocks the character out for good.
pub(crate) fn on_player_hp_change(world: &mut World, event: &GameEvent) {
    let GameEvent::HpChange(change) = event else {
        return;
    };
    let Ok(mut target) = world.get_entity_mut(change.target) else {
        return;
    };
    if !target.contains::<PlayerActions>() || target.contains::<Downed>() {
        return;
    }
    if target.get::<Health>().is_some_and(|h| h.is_empty()) {
        target.insert(Downed);
        if let Some(mut actions) = target.get_mut::<PlayerActions>() {
            actions.knock_out();
        }
        info!("Character {:?} is down", change.target);
        return;
    }
    if change.amount >= 0 {
        return;
    }

    let recover_time = world
        .get_resource::<MovementTuning>()
        .map_or(0.4, |t| t.hit_recover_time);
    if let Some(mut actions) = world.get_mut::<PlayerActions>(change.target) {
        actions.enter_hit(recover_time);
    }
}
