//! Combat domain: bus handlers that apply damage and resource changes.
//!
//! Meters change only here, in response to bus events. Targets that no longer exist are
//! ignored.

use bevy::prelude::*;

use crate::combat::components::{Boss, Enemy, Health, Mana};
use crate::core::{GameEvent, ResourceChange, publish};

/// `bullet_hit_enemy`: subtract HP and remove the enemy once it is exhausted.
pub(crate) fn on_bullet_hit_enemy(world: &mut World, event: &GameEvent) {
    let GameEvent::BulletHitEnemy(info) = event else {
        return;
    };
    let Ok(mut target) = world.get_entity_mut(info.target) else {
        debug!("bullet_hit_enemy: target {:?} already gone", info.target);
        return;
    };
    if !target.contains::<Enemy>() {
        return;
    }
    let is_boss = target.contains::<Boss>();
    let Some(mut health) = target.get_mut::<Health>() else {
        return;
    };

    health.apply(-info.damage);
    debug!(
        "Enemy {:?} hit for {}, hp {}/{}",
        info.target, info.damage, health.current, health.base
    );
    if !health.is_empty() {
        return;
    }

    target.despawn();
    info!("Enemy {:?} destroyed", info.target);
    if is_boss {
        publish(world, GameEvent::KillBoss { boss: info.target });
    }
}

/// `bullet_hit_player`: damage is applied through `hp_change`.
pub(crate) fn on_bullet_hit_player(world: &mut World, event: &GameEvent) {
    let GameEvent::BulletHitPlayer(info) = event else {
        return;
    };
    publish(
        world,
        GameEvent::HpChange(ResourceChange {
            target: info.target,
            amount: -info.damage,
        }),
    );
}

/// `hp_change`: clamp into `[0, base]`.
pub(crate) fn on_hp_change(world: &mut World, event: &GameEvent) {
    let GameEvent::HpChange(change) = event else {
        return;
    };
    let Some(mut health) = world.get_mut::<Health>(change.target) else {
        return;
    };
    let applied = health.apply(change.amount);
    debug!(
        "HP {:?}: {:+} (applied {:+}) -> {}/{}",
        change.target, change.amount, applied, health.current, health.base
    );
    if health.is_empty() {
        info!("{:?} is down", change.target);
    }
}

/// `mana_change`: clamp into `[0, base]`.
pub(crate) fn on_mana_change(world: &mut World, event: &GameEvent) {
    let GameEvent::ManaChange(change) = event else {
        return;
    };
    let Some(mut mana) = world.get_mut::<Mana>(change.target) else {
        return;
    };
    let applied = mana.apply(change.amount);
    debug!(
        "Mana {:?}: {:+} (applied {:+}) -> {}/{}",
        change.target, change.amount, applied, mana.current, mana.base
    );
}
