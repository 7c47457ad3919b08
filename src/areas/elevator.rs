//! Areas domain: moving platforms, their riders, and the thrown broom.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::areas::AreaTuning;
use crate::areas::streaming::AreaScoped;
use crate::combat::{ContactKind, Lifetime};
use crate::movement::{Facing, GameLayer};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Leg {
    from: Vec2,
    to: Vec2,
    duration: f32,
}

/// Looping waypoint route: wait, visit every waypoint, wait, then walk back to the start.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorPath {
    start: Vec2,
    legs: Vec<Leg>,
    period: f32,
}

impl ElevatorPath {
    pub fn new(start: Vec2, waypoints: &[Vec2], pause: f32, segment_time: f32) -> Self {
        let pause = pause.max(0.0);
        let segment_time = segment_time.max(0.0);
        let mut legs = Vec::with_capacity(waypoints.len() * 2 + 2);
        let mut at = start;

        legs.push(Leg {
            from: at,
            to: at,
            duration: pause,
        });
        for &point in waypoints {
            if point == at {
                continue;
            }
            legs.push(Leg {
                from: at,
                to: point,
                duration: segment_time,
            });
            at = point;
        }
        legs.push(Leg {
            from: at,
            to: at,
            duration: pause,
        });
        // Back through the earlier waypoints to the start
        let returns = waypoints.iter().rev().skip(1).copied();
        let returns = returns.chain((!waypoints.is_empty()).then_some(start));
        for point in returns {
            if point == at {
                continue;
            }
            legs.push(Leg {
                from: at,
                to: point,
                duration: segment_time,
            });
            at = point;
        }

        let period = legs.iter().map(|leg| leg.duration).sum();
        Self {
            start,
            legs,
            period,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn position_at(&self, time: f32) -> Vec2 {
        if self.period <= 0.0 {
            return self.start;
        }
        let mut t = time.rem_euclid(self.period);
        for leg in &self.legs {
            if t < leg.duration {
                return leg.from.lerp(leg.to, t / leg.duration);
            }
            t -= leg.duration;
        }
        self.legs.last().map_or(self.start, |leg| leg.to)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Elevator {
    pub path: ElevatorPath,
    pub elapsed: f32,
}

/// Thrown broom; breaks on the first ground contact.
#[derive(Component, Debug)]
pub struct Broom;

/// Bodies standing on a moving platform, carried along with its displacement.
#[derive(Component, Debug, Default)]
pub struct Riders {
    members: Vec<Entity>,
    last_position: Option<Vec2>,
}

impl Riders {
    pub fn add(&mut self, rider: Entity) -> bool {
        if self.members.contains(&rider) {
            return false;
        }
        self.members.push(rider);
        true
    }

    pub fn remove(&mut self, rider: Entity) -> bool {
        let before = self.members.len();
        self.members.retain(|e| *e != rider);
        before != self.members.len()
    }

    pub fn contains(&self, rider: Entity) -> bool {
        self.members.contains(&rider)
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }
}

pub fn elevator_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Elevator, [GameLayer::Player, GameLayer::Enemy])
}

/// Spawn the broom in front of the thrower.
pub fn spawn_broom(
    world: &mut World,
    position: Vec2,
    facing: Facing,
    speed: f32,
    width: f32,
    tuning: &AreaTuning,
) -> Entity {
    let size = Vec2::new(width, tuning.elevator_height);
    let start = position + Vec2::X * facing.sign() * width;
    let entity = world
        .spawn((
            Broom,
            ContactKind::Elevator,
            Riders::default(),
            AreaScoped,
            Lifetime(tuning.broom_lifetime),
            Sprite {
                color: Color::srgb(0.7, 0.5, 0.2),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(start.x, start.y, 1.0),
            RigidBody::Dynamic,
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED.lock_translation_y(),
            Collider::rectangle(size.x, size.y),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Elevator,
                [GameLayer::Player, GameLayer::Enemy, GameLayer::Ground],
            ),
            ActiveCollisionHooks::MODIFY_CONTACTS,
            LinearVelocity(Vec2::X * facing.sign() * speed),
        ))
        .id();
    debug!("Broom thrown from {:?}", position);
    entity
}

pub(crate) fn move_elevators(time: Res<Time>, mut elevators: Query<(&mut Elevator, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut elevator, mut transform) in &mut elevators {
        elevator.elapsed += dt;
        let position = elevator.path.position_at(elevator.elapsed);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Move every rider by the displacement of its platform since the last frame.
pub(crate) fn carry_riders(
    mut platforms: Query<(&Transform, &mut Riders)>,
    mut bodies: Query<&mut Transform, Without<Riders>>,
) {
    let mut moves = Vec::new();
    for (transform, mut riders) in &mut platforms {
        let position = transform.translation.truncate();
        if let Some(last) = riders.last_position {
            let delta = position - last;
            if delta != Vec2::ZERO {
                moves.extend(riders.members.iter().map(|rider| (*rider, delta)));
            }
        }
        riders.last_position = Some(position);
    }

    for (rider, delta) in moves {
        if let Ok(mut transform) = bodies.get_mut(rider) {
            transform.translation += delta.extend(0.0);
        }
    }
}
