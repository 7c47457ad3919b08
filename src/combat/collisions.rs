//! Combat domain: physics glue for contact resolution.
//!
//! One-way surfaces are filtered in the narrow phase through collision hooks; the
//! gameplay effects of a contact are applied when its `CollisionStart` arrives.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::areas::Riders;
use crate::combat::ai::EnemyBrain;
use crate::combat::components::{Bullet, DetectionSensor, EventPoint, JumpCharges, Lifetime};
use crate::combat::contacts::{
    BodyKind, ContactBody, ContactEffect, ContactKind, resolve_begin, resolve_separate,
};
use crate::combat::CombatTuning;
use crate::combat::spawn::spawn_spark;
use crate::core::publish;
use crate::player::PlayerActions;

type BodyData = (
    &'static ContactKind,
    Option<&'static Bullet>,
    Option<&'static EventPoint>,
    Option<&'static DetectionSensor>,
);

/// Build the resolver view of a collider entity.
fn contact_body(collider: Entity, bodies: &Query<BodyData>) -> ContactBody {
    let Ok((kind, bullet, point, sensor)) = bodies.get(collider) else {
        return ContactBody::new(collider, BodyKind::Untagged);
    };
    if let Some(sensor) = sensor {
        return ContactBody::detection(sensor.owner);
    }
    let kind = match kind {
        ContactKind::Player => BodyKind::Player,
        ContactKind::Enemy => BodyKind::Enemy,
        ContactKind::Bullet => match bullet {
            Some(bullet) => BodyKind::Bullet {
                damage: bullet.damage,
                team: bullet.team,
            },
            None => BodyKind::Untagged,
        },
        ContactKind::Elevator => BodyKind::Elevator,
        ContactKind::EventPoint => match point {
            Some(point) => BodyKind::EventPoint {
                event_id: point.event_id.clone(),
            },
            None => BodyKind::Untagged,
        },
        ContactKind::Ground => BodyKind::Ground,
        ContactKind::OneWayPlatform => BodyKind::OneWayPlatform,
    };
    ContactBody::new(collider, kind)
}

/// Narrow-phase filter for colliders with `ActiveCollisionHooks::MODIFY_CONTACTS`.
#[derive(SystemParam)]
pub struct StageContactHooks<'w, 's> {
    bodies: Query<'w, 's, BodyData>,
    tuning: Res<'w, CombatTuning>,
}

impl CollisionHooks for StageContactHooks<'_, '_> {
    fn modify_contacts(&self, contacts: &mut ContactPair, _commands: &mut Commands) -> bool {
        let Some(normal) = contacts.manifolds.first().map(|m| m.normal) else {
            return true;
        };
        let a = contact_body(contacts.collider1, &self.bodies);
        let b = contact_body(contacts.collider2, &self.bodies);
        resolve_begin(&a, &b, normal, self.tuning.contact_damage).accept
    }
}

pub(crate) fn resolve_contact_starts(
    mut commands: Commands,
    mut starts: MessageReader<CollisionStart>,
    collisions: Collisions,
    bodies: Query<BodyData>,
    tuning: Res<CombatTuning>,
) {
    let mut removed = HashSet::new();

    for event in starts.read() {
        let a = contact_body(event.collider1, &bodies);
        let b = contact_body(event.collider2, &bodies);
        if removed.contains(&a.entity) || removed.contains(&b.entity) {
            continue;
        }

        // Orient the stored normal to point from collider1 to collider2 of this event
        let normal = collisions
            .get(event.collider1, event.collider2)
            .and_then(|pair| {
                let normal = pair.manifolds.first()?.normal;
                Some(if pair.collider1 == event.collider1 {
                    normal
                } else {
                    -normal
                })
            })
            .unwrap_or(Vec2::ZERO);

        let resolution = resolve_begin(&a, &b, normal, tuning.contact_damage);
        if !resolution.accept {
            continue;
        }
        for effect in resolution.effects {
            if let ContactEffect::Despawn(entity) = effect {
                removed.insert(entity);
            }
            commands.queue(move |world: &mut World| apply_contact_effect(world, effect));
        }
    }
}

pub(crate) fn resolve_contact_ends(
    mut commands: Commands,
    mut ends: MessageReader<CollisionEnd>,
    bodies: Query<BodyData>,
) {
    for event in ends.read() {
        let a = contact_body(event.collider1, &bodies);
        let b = contact_body(event.collider2, &bodies);
        for effect in resolve_separate(&a, &b) {
            commands.queue(move |world: &mut World| apply_contact_effect(world, effect));
        }
    }
}

/// Apply one resolved effect. Entities removed earlier in the frame are skipped.
pub fn apply_contact_effect(world: &mut World, effect: ContactEffect) {
    match effect {
        ContactEffect::ResetJump(entity) => {
            let Ok(mut target) = world.get_entity_mut(entity) else {
                return;
            };
            if let Some(mut actions) = target.get_mut::<PlayerActions>() {
                actions.reset_jump();
            } else if let Some(mut jumps) = target.get_mut::<JumpCharges>() {
                jumps.refill();
            }
        }
        ContactEffect::Publish(event) => publish(world, event),
        ContactEffect::Despawn(entity) => {
            if let Ok(target) = world.get_entity_mut(entity) {
                target.despawn();
            }
        }
        ContactEffect::AddRider { elevator, rider } => {
            if let Some(mut riders) = world.get_mut::<Riders>(elevator) {
                riders.add(rider);
            }
        }
        ContactEffect::RemoveRider { elevator, rider } => {
            if let Some(mut riders) = world.get_mut::<Riders>(elevator) {
                riders.remove(rider);
            }
        }
        ContactEffect::DetectPlayer { enemy } => {
            if let Some(mut brain) = world.get_mut::<EnemyBrain>(enemy) {
                brain.on_player_detected();
                debug!("Enemy {:?} detected the player: {:?}", enemy, brain.mode());
            }
        }
        ContactEffect::SpawnSpark { at } => {
            let Some(position) = world
                .get::<Transform>(at)
                .map(|t| t.translation.truncate())
            else {
                return;
            };
            let (size, lifetime) = world
                .get_resource::<CombatTuning>()
                .map(|t| (t.spark_size, t.spark_lifetime))
                .unwrap_or((10.0, 0.3));
            spawn_spark(world, position, size, lifetime);
        }
    }
}

/// Count down lifetimes and remove expired bullets and sparks.
pub(crate) fn expire_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}
