//! Movement domain: physics layers, locomotion rules, stage geometry, and input.

mod bootstrap;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod locomotion;
mod resources;
pub(crate) mod systems;


pub use bootstrap::{StaticShape, static_shape};
pub use components::{Facing, GameLayer, Ground, OneWayPlatform};
pub use locomotion::{dash_velocity, jump_velocity, release_step, run_step};
pub use resources::MovementTuning;

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_stage_geometry;
use crate::movement::components::sync_sprite_facing;
use crate::movement::systems::{read_input, read_settings_input, sync_gravity};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .register_type::<MovementTuning>()
            .add_systems(OnExit(GameState::Boot), spawn_stage_geometry)
            .add_systems(Update, (sync_gravity, read_settings_input, sync_sprite_facing))
            .add_systems(Update, read_input.run_if(in_state(GameState::Playing)));

        #[cfg(feature = "dev-tools")]
        dev::add_dev_tools(app);
    }
}
