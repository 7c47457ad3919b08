mod areas;
mod combat;
mod content;
mod core;
mod movement;
mod player;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::StageContactHooks;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Danmaku Stage".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default().with_collision_hooks::<StageContactHooks>())
        .insert_resource(Gravity(Vec2::NEG_Y * 1000.0))
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            movement::MovementPlugin,
            // Combat subscribes first so meters are clamped before player reactions run
            combat::CombatPlugin,
            player::PlayerPlugin,
            areas::AreasPlugin,
        ))
        .run();
}
