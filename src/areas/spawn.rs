//! Areas domain: instantiating a region's manifest.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::areas::AreaTuning;
use crate::areas::elevator::{Elevator, ElevatorPath, Riders, elevator_layers};
use crate::areas::streaming::{AreaScoped, RegionManifest, SpawnKind};
use crate::combat::{Aim, Boss, ContactKind, Emitter, EventPoint, spawn_enemy};
use crate::content::{ContentRegistry, SpellCardStyle};
use crate::movement::GameLayer;

/// Marks a region's bullet launcher
#[derive(Component, Debug)]
pub struct Launcher;

/// Full-region backdrop naming the background image for the sprite layer
#[derive(Component, Debug)]
pub struct Backdrop {
    pub image: Option<String>,
}

/// Floating marker above a boss
#[derive(Component, Debug)]
pub struct BossIndicator;

/// Spawn everything in `manifest`. Returns how many bosses the region holds.
pub(crate) fn spawn_region(
    commands: &mut Commands,
    manifest: &RegionManifest,
    registry: &ContentRegistry,
    launcher_style: &SpellCardStyle,
    tuning: &AreaTuning,
) -> u32 {
    let area = &manifest.area;
    commands.spawn((
        Backdrop {
            image: area.background.clone(),
        },
        AreaScoped,
        Sprite {
            color: Color::srgb(0.12, 0.14, 0.18),
            custom_size: Some(area.rect.size()),
            ..default()
        },
        Transform::from_translation(area.rect.center().extend(-10.0)),
    ));

    let mut bosses = 0;
    for spawn in &manifest.spawns {
        let at = spawn.position;
        match &spawn.kind {
            SpawnKind::Launcher => {
                commands.spawn((
                    Launcher,
                    AreaScoped,
                    Emitter::new(launcher_style.clone(), Aim::ActivePlayer),
                    Sprite {
                        color: Color::srgb(0.8, 0.8, 0.3),
                        custom_size: Some(Vec2::splat(16.0)),
                        ..default()
                    },
                    Transform::from_xyz(at.x, at.y, 1.0),
                ));
            }
            SpawnKind::Elevator { waypoints } => {
                let size = tuning.elevator_size();
                commands.spawn((
                    Elevator {
                        path: ElevatorPath::new(
                            at,
                            waypoints,
                            tuning.elevator_pause,
                            tuning.segment_time,
                        ),
                        elapsed: 0.0,
                    },
                    Riders::default(),
                    ContactKind::Elevator,
                    AreaScoped,
                    Sprite {
                        color: Color::srgb(0.5, 0.5, 0.6),
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_xyz(at.x, at.y, 1.0),
                    RigidBody::Kinematic,
                    Collider::rectangle(size.x, size.y),
                    CollisionEventsEnabled,
                    elevator_layers(),
                    ActiveCollisionHooks::MODIFY_CONTACTS,
                ));
            }
            SpawnKind::Enemy { tag, boss } => {
                let Some(def) = registry.enemies.get(tag) else {
                    debug!("Skipping enemy '{}': unknown tag '{}'", spawn.name, tag);
                    continue;
                };
                let enemy = spawn_enemy(commands, def, at);
                commands.entity(enemy).insert(AreaScoped);
                // Bosses by definition already carry the marker
                if *boss && !def.boss {
                    commands.entity(enemy).insert(Boss);
                }
                if def.boss || *boss {
                    commands.entity(enemy).with_children(|parent| {
                        parent.spawn((
                            BossIndicator,
                            Sprite {
                                color: Color::srgb(1.0, 0.2, 0.2),
                                custom_size: Some(Vec2::new(12.0, 6.0)),
                                ..default()
                            },
                            Transform::from_xyz(0.0, def.body_height * 0.5 + 12.0, 0.5),
                        ));
                    });
                    bosses += 1;
                }
            }
            SpawnKind::EventPoint { event_id } => {
                let size = tuning.event_point_size();
                commands.spawn((
                    EventPoint {
                        event_id: event_id.clone(),
                    },
                    ContactKind::EventPoint,
                    AreaScoped,
                    Sprite {
                        color: Color::srgb(0.4, 0.9, 0.6),
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_xyz(at.x, at.y, 1.0),
                    Collider::rectangle(size.x, size.y),
                    Sensor,
                    CollisionEventsEnabled,
                    CollisionLayers::new(GameLayer::EventPoint, [GameLayer::Player]),
                ));
            }
            SpawnKind::Decoration { size } => {
                commands.spawn((
                    AreaScoped,
                    Sprite {
                        color: Color::srgb(0.3, 0.35, 0.3),
                        custom_size: Some(*size),
                        ..default()
                    },
                    Transform::from_xyz(at.x, at.y, -5.0),
                ));
            }
        }
    }

    info!(
        "Region '{}' spawned {} object(s), {} boss(es)",
        area.name,
        manifest.spawns.len(),
        bosses
    );
    bosses
}
