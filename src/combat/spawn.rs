//! Combat domain: enemy, bullet, and hit-effect spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::{EnemyBrain, EnemyIntervals};
use crate::combat::components::{
    Boss, Bullet, DetectionSensor, Enemy, Health, JumpCharges, Lifetime, Spark, Team,
};
use crate::combat::contacts::ContactKind;
use crate::content::{BulletDef, EnemyDef};
use crate::movement::{Facing, GameLayer};

/// Bundle for spawning a region enemy from its definition
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub kind: ContactKind,
    pub team: Team,
    pub health: Health,
    pub brain: EnemyBrain,
    pub facing: Facing,
    pub jumps: JumpCharges,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub max_speed: MaxLinearSpeed,
    pub friction: Friction,
    pub locked_axes: LockedAxes,
}

impl EnemyBundle {
    pub fn new(def: &EnemyDef, position: Vec2) -> Self {
        let size = Vec2::new(def.body_width, def.body_height);
        Self {
            enemy: Enemy {
                def_id: def.id.clone(),
                run_impulse: def.run_impulse,
            },
            kind: ContactKind::Enemy,
            team: Team::Enemy,
            health: Health::new(def.hp),
            brain: EnemyBrain::new(EnemyIntervals {
                patrol: def.patrol_interval,
                alert: def.alert_interval,
                run: def.run_interval,
            }),
            facing: Facing::Left,
            jumps: JumpCharges::new(1),
            sprite: Sprite {
                color: if def.boss {
                    Color::srgb(0.8, 0.2, 0.3)
                } else {
                    Color::srgb(0.6, 0.4, 0.3)
                },
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 1.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [
                    GameLayer::Ground,
                    GameLayer::OneWayPlatform,
                    GameLayer::Player,
                    GameLayer::PlayerBullet,
                    GameLayer::Elevator,
                ],
            ),
            velocity: LinearVelocity::default(),
            max_speed: MaxLinearSpeed(def.max_speed),
            friction: Friction::new(0.2),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

/// Spawn an enemy body with its detection box as a sensor child.
pub fn spawn_enemy(commands: &mut Commands, def: &EnemyDef, position: Vec2) -> Entity {
    let mut entity = commands.spawn(EnemyBundle::new(def, position));
    if def.boss {
        entity.insert(Boss);
    }
    let owner = entity.id();

    entity.with_children(|parent| {
        parent.spawn((
            DetectionSensor { owner },
            ContactKind::Enemy,
            Transform::default(),
            Collider::rectangle(def.detection_width, def.detection_height),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Detection, [GameLayer::Player]),
        ));
    });

    debug!("Spawned enemy '{}' at {:?}", def.id, position);
    owner
}

pub fn bullet_layers(team: Team) -> CollisionLayers {
    match team {
        Team::Player => CollisionLayers::new(GameLayer::PlayerBullet, [GameLayer::Enemy]),
        Team::Enemy => CollisionLayers::new(GameLayer::EnemyBullet, [GameLayer::Player]),
    }
}

/// Spawn a bullet that flies at `velocity` for the definition's flight time.
pub fn spawn_bullet(
    commands: &mut Commands,
    position: Vec2,
    velocity: Vec2,
    def: &BulletDef,
    team: Team,
) -> Entity {
    let color = match team {
        Team::Player => Color::srgb(0.9, 0.3, 0.3),
        Team::Enemy => Color::srgb(0.5, 0.6, 1.0),
    };
    commands
        .spawn((
            Bullet {
                damage: def.damage,
                team,
            },
            ContactKind::Bullet,
            Lifetime(def.flight_time),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(def.size)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 2.0),
            RigidBody::Kinematic,
            Collider::circle(def.size * 0.5),
            Sensor,
            CollisionEventsEnabled,
            bullet_layers(team),
            LinearVelocity(velocity),
        ))
        .id()
}

/// Spawn the short-lived hit effect.
pub fn spawn_spark(world: &mut World, position: Vec2, size: f32, lifetime: f32) {
    world.spawn((
        Spark,
        Lifetime(lifetime),
        Sprite {
            color: Color::srgb(1.0, 0.9, 0.5),
            custom_size: Some(Vec2::splat(size)),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 3.0),
    ));
}
