//! Combat domain: meters, contact resolution, enemy behavior, and bullet emitters.

pub(crate) mod ai;
mod collisions;
mod components;
pub(crate) mod contacts;
mod damage;
pub(crate) mod emitter;
mod resources;
mod spawn;

#[cfg(test)]
mod tests;

pub use ai::{EnemyBrain, EnemyIntervals, EnemyMode, EnemyTimer, PatrolChoice, roll_patrol};
pub use collisions::{StageContactHooks, apply_contact_effect};
pub use components::*;
pub use contacts::{
    BodyKind, ContactBody, ContactEffect, ContactKind, Resolution, ShapeRole, resolve_begin,
    resolve_separate,
};
pub use emitter::{Aim, Emitter, Shot, volley};
pub use resources::CombatTuning;
pub use spawn::{EnemyBundle, bullet_layers, spawn_bullet, spawn_enemy, spawn_spark};

use bevy::prelude::*;

use crate::core::{BusAppExt, EventKind, GameState};

pub(crate) use damage::{on_bullet_hit_enemy, on_bullet_hit_player, on_hp_change, on_mana_change};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .register_type::<CombatTuning>()
            .subscribe(EventKind::BulletHitEnemy, on_bullet_hit_enemy)
            .subscribe(EventKind::BulletHitPlayer, on_bullet_hit_player)
            .subscribe(EventKind::HpChange, on_hp_change)
            .subscribe(EventKind::ManaChange, on_mana_change)
            .add_systems(
                Update,
                (
                    collisions::resolve_contact_starts,
                    collisions::resolve_contact_ends,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    ai::update_enemy_brains,
                    emitter::run_emitters,
                    collisions::expire_lifetimes,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
