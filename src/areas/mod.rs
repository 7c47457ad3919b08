//! Areas domain: region streaming, moving platforms, boss tracking, and camera follow.

mod boss;
mod camera;
mod elevator;
mod resources;
mod spawn;
mod streaming;
mod systems;


pub use boss::BossTracker;
pub use camera::{CameraRig, follow_point};
pub use elevator::{Broom, Elevator, ElevatorPath, Riders, elevator_layers, spawn_broom};
pub use resources::AreaTuning;
pub use spawn::{Backdrop, BossIndicator, Launcher};
pub use streaming::{
    AreaDef, AreaScoped, AreaStreamer, RegionManifest, SpawnDescriptor, SpawnKind,
    areas_from_map, select_area,
};

use bevy::prelude::*;

use crate::areas::boss::{on_kill_boss, on_trigger_event, tick_boss_tracker};
use crate::areas::camera::follow_camera;
use crate::areas::elevator::{carry_riders, move_elevators};
use crate::areas::systems::stream_areas;
use crate::core::{BusAppExt, EventKind, GameState};

pub struct AreasPlugin;

impl Plugin for AreasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AreaTuning>()
            .register_type::<AreaTuning>()
            .init_resource::<AreaStreamer>()
            .init_resource::<CameraRig>()
            .init_resource::<BossTracker>()
            .subscribe(EventKind::KillBoss, on_kill_boss)
            .subscribe(EventKind::TriggerEvent, on_trigger_event)
            .add_systems(
                Update,
                (
                    stream_areas,
                    (move_elevators, carry_riders).chain(),
                    tick_boss_tracker,
                    follow_camera,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
