//! Movement domain: static stage geometry from the map's `physics` group.
//!
//! Rectangles and polygons become solid ground. Polylines become one-way platforms that
//! only hold bodies landing on them from above.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ContactKind;
use crate::content::{MapObject, StageMap};
use crate::movement::{GameLayer, Ground, OneWayPlatform};

/// Collider and marker for one authored shape.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticShape {
    Solid { center: Vec2, size: Vec2 },
    Hull { points: Vec<Vec2> },
    OneWay { points: Vec<Vec2> },
}

/// Shape described by an object, or `None` when it cannot produce a collider.
pub fn static_shape(object: &MapObject) -> Option<StaticShape> {
    if let Some(points) = object.polyline_world() {
        return Some(StaticShape::OneWay { points });
    }
    if let Some(points) = object.polygon_world() {
        return (points.len() >= 3).then_some(StaticShape::Hull { points });
    }
    let rect = object.rect()?;
    Some(StaticShape::Solid {
        center: rect.center(),
        size: rect.size(),
    })
}

fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Ground,
        [GameLayer::Player, GameLayer::Enemy, GameLayer::Elevator],
    )
}

fn one_way_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::OneWayPlatform,
        [GameLayer::Player, GameLayer::Enemy],
    )
}

/// Spawn the stage's static colliders once, when play begins.
pub(crate) fn spawn_stage_geometry(mut commands: Commands, stage: Res<StageMap>) {
    let ground_color = Color::srgb(0.35, 0.4, 0.35);
    let mut spawned = 0;

    for object in stage.group("physics") {
        let Some(shape) = static_shape(object) else {
            debug!("Skipping physics object '{}': no usable shape", object.name);
            continue;
        };

        match shape {
            StaticShape::Solid { center, size } => {
                commands.spawn((
                    Ground,
                    ContactKind::Ground,
                    Sprite {
                        color: ground_color,
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_xyz(center.x, center.y, 0.0),
                    RigidBody::Static,
                    Collider::rectangle(size.x, size.y),
                    ground_layers(),
                ));
            }
            StaticShape::Hull { points } => {
                let Some(collider) = Collider::convex_hull(points) else {
                    debug!("Skipping physics object '{}': degenerate polygon", object.name);
                    continue;
                };
                commands.spawn((
                    Ground,
                    ContactKind::Ground,
                    Transform::default(),
                    RigidBody::Static,
                    collider,
                    ground_layers(),
                ));
            }
            StaticShape::OneWay { points } => {
                commands.spawn((
                    OneWayPlatform,
                    ContactKind::OneWayPlatform,
                    Transform::default(),
                    RigidBody::Static,
                    Collider::polyline(points, None),
                    one_way_layers(),
                    ActiveCollisionHooks::MODIFY_CONTACTS,
                ));
            }
        }
        spawned += 1;
    }

    info!("Spawned {} static colliders", spawned);
}
