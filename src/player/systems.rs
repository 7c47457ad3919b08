//! Player domain: per-frame update of the action machines.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{CombatTuning, Team, spawn_bullet};
use crate::movement::{Facing, MovementTuning};
use crate::player::party::{Downed, Party};
use crate::player::state::PlayerActions;

/// Advance every standing character's timers, write back velocity, and fire the active attack.
pub(crate) fn tick_player_actions(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    party: Res<Party>,
    mut players: Query<
        (
            Entity,
            &mut PlayerActions,
            &mut LinearVelocity,
            &mut Facing,
            &Transform,
        ),
        Without<Downed>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut actions, mut velocity, mut facing, transform) in &mut players {
        let step = actions.tick(dt, velocity.0, &tuning);
        if step.velocity != velocity.0 {
            velocity.0 = step.velocity;
        }
        if *facing != actions.facing() {
            *facing = actions.facing();
        }

        if step.shots == 0 || !party.is_active(entity) {
            continue;
        }
        let Some(slot) = actions.active_attack() else {
            continue;
        };
        let dir = Vec2::X * facing.sign();
        let muzzle = transform.translation.truncate() + dir * combat.muzzle_offset;
        for _ in 0..step.shots {
            spawn_bullet(
                &mut commands,
                muzzle,
                dir * slot.bullet.speed,
                &slot.bullet,
                Team::Player,
            );
        }
    }
}
