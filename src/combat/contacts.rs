//! Combat domain: contact resolution between physics bodies.
//!
//! Resolution is a pure function of the two bodies and the contact normal. Arguments are
//! put in a canonical order first, so `resolve_begin(a, b, n)` and `resolve_begin(b, a, -n)`
//! always agree.

use bevy::prelude::*;

use crate::combat::Team;
use crate::core::{DamageInfo, GameEvent};

/// Minimum vertical component for a normal to count as "from above".
const ONE_WAY_EPSILON: f32 = 1.0e-3;

/// Gameplay category stored on every collider entity that takes part in resolution.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ContactKind {
    Player,
    Enemy,
    Bullet,
    Elevator,
    EventPoint,
    Ground,
    OneWayPlatform,
}

/// Which shape of the owning entity made the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeRole {
    #[default]
    Body,
    DetectionRange,
}

/// Category plus the payload the rules need.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Player,
    Enemy,
    Bullet { damage: i32, team: Team },
    Elevator,
    EventPoint { event_id: String },
    Ground,
    OneWayPlatform,
    /// Collider with no gameplay owner
    Untagged,
}

impl BodyKind {
    fn rank(&self) -> u8 {
        match self {
            BodyKind::Enemy => 0,
            BodyKind::Player => 1,
            BodyKind::Elevator => 2,
            BodyKind::Bullet { .. } => 3,
            BodyKind::EventPoint { .. } => 4,
            BodyKind::Ground => 5,
            BodyKind::OneWayPlatform => 6,
            BodyKind::Untagged => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactBody {
    /// Owning entity (the enemy for a detection box)
    pub entity: Entity,
    pub kind: BodyKind,
    pub shape: ShapeRole,
}

impl ContactBody {
    pub fn new(entity: Entity, kind: BodyKind) -> Self {
        Self {
            entity,
            kind,
            shape: ShapeRole::Body,
        }
    }

    pub fn detection(owner: Entity) -> Self {
        Self {
            entity: owner,
            kind: BodyKind::Enemy,
            shape: ShapeRole::DetectionRange,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactEffect {
    ResetJump(Entity),
    Publish(GameEvent),
    Despawn(Entity),
    AddRider { elevator: Entity, rider: Entity },
    RemoveRider { elevator: Entity, rider: Entity },
    DetectPlayer { enemy: Entity },
    SpawnSpark { at: Entity },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub accept: bool,
    pub effects: Vec<ContactEffect>,
}

impl Resolution {
    pub fn accept() -> Self {
        Self {
            accept: true,
            effects: Vec::new(),
        }
    }

    pub fn reject() -> Self {
        Self {
            accept: false,
            effects: Vec::new(),
        }
    }

    fn with(effects: Vec<ContactEffect>) -> Self {
        Self {
            accept: true,
            effects,
        }
    }
}

/// Order the pair by kind rank, flipping the normal when the arguments swap.
fn canonical<'a>(
    a: &'a ContactBody,
    b: &'a ContactBody,
    normal: Vec2,
) -> (&'a ContactBody, &'a ContactBody, Vec2) {
    if b.kind.rank() < a.kind.rank() {
        (b, a, -normal)
    } else {
        (a, b, normal)
    }
}

/// `normal` points from `subject` to `surface`. The surface pushes back along `-normal`,
/// which must point up for the subject to be standing on it.
fn lands_on_top(normal: Vec2) -> bool {
    -normal.y > ONE_WAY_EPSILON
}

fn one_way(subject: Entity, surface: Option<Entity>, normal: Vec2) -> Resolution {
    if !lands_on_top(normal) {
        return Resolution::reject();
    }
    let mut effects = vec![ContactEffect::ResetJump(subject)];
    if let Some(elevator) = surface {
        effects.push(ContactEffect::AddRider {
            elevator,
            rider: subject,
        });
    }
    Resolution::with(effects)
}

fn bullet_hit(
    target: Entity,
    bullet: Entity,
    damage: i32,
    event: fn(DamageInfo) -> GameEvent,
) -> Resolution {
    Resolution::with(vec![
        ContactEffect::SpawnSpark { at: target },
        ContactEffect::Publish(event(DamageInfo { damage, target })),
        ContactEffect::Despawn(bullet),
    ])
}

/// Decide whether a new contact is solid and what it triggers.
///
/// `normal` points from `a` to `b`. Pairs without a rule are accepted without effects.
pub fn resolve_begin(
    a: &ContactBody,
    b: &ContactBody,
    normal: Vec2,
    contact_damage: i32,
) -> Resolution {
    let (a, b, normal) = canonical(a, b, normal);

    if matches!(a.kind, BodyKind::Untagged) || matches!(b.kind, BodyKind::Untagged) {
        return Resolution::accept();
    }

    // Detection boxes only ever react to the player
    if a.shape == ShapeRole::DetectionRange || b.shape == ShapeRole::DetectionRange {
        return match (&a.kind, a.shape, &b.kind) {
            (BodyKind::Enemy, ShapeRole::DetectionRange, BodyKind::Player) => {
                Resolution::with(vec![ContactEffect::DetectPlayer { enemy: a.entity }])
            }
            _ => Resolution::accept(),
        };
    }

    match (&a.kind, &b.kind) {
        (BodyKind::Enemy | BodyKind::Player, BodyKind::OneWayPlatform) => {
            one_way(a.entity, None, normal)
        }
        (BodyKind::Enemy | BodyKind::Player, BodyKind::Elevator) => {
            one_way(a.entity, Some(b.entity), normal)
        }
        (BodyKind::Enemy, BodyKind::Bullet { damage, team: Team::Player }) => {
            bullet_hit(a.entity, b.entity, *damage, GameEvent::BulletHitEnemy)
        }
        (BodyKind::Player, BodyKind::Bullet { damage, team: Team::Enemy }) => {
            bullet_hit(a.entity, b.entity, *damage, GameEvent::BulletHitPlayer)
        }
        (BodyKind::Enemy, BodyKind::Player) => {
            Resolution::with(vec![ContactEffect::Publish(GameEvent::BulletHitPlayer(
                DamageInfo {
                    damage: contact_damage,
                    target: b.entity,
                },
            ))])
        }
        (BodyKind::Player, BodyKind::EventPoint { event_id }) => Resolution::with(vec![
            ContactEffect::Publish(GameEvent::TriggerEvent {
                event_id: event_id.clone(),
            }),
            ContactEffect::Despawn(b.entity),
        ]),
        (BodyKind::Elevator, BodyKind::Ground) => {
            Resolution::with(vec![ContactEffect::Despawn(a.entity)])
        }
        _ => Resolution::accept(),
    }
}

/// Effects of two bodies no longer touching.
pub fn resolve_separate(a: &ContactBody, b: &ContactBody) -> Vec<ContactEffect> {
    let (a, b, _) = canonical(a, b, Vec2::ZERO);
    if a.shape != ShapeRole::Body || b.shape != ShapeRole::Body {
        return Vec::new();
    }
    match (&a.kind, &b.kind) {
        (BodyKind::Enemy | BodyKind::Player, BodyKind::Elevator) => {
            vec![ContactEffect::RemoveRider {
                elevator: b.entity,
                rider: a.entity,
            }]
        }
        _ => Vec::new(),
    }
}
