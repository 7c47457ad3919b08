//! Core domain: stage flow, event bus, and shared scheduling primitives.

pub mod bus;
mod resources;
pub mod schedule;
mod state;
mod systems;


pub use bus::{
    BusAppExt, DamageInfo, EventBus, EventKind, GameEvent, PublishExt, ResourceChange, publish,
};
pub use resources::{AiRng, AudioRequest, RunConfig};
pub use schedule::{Cadence, Schedules};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{finish_boot, log_audio_requests, setup_camera, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<EventBus>()
            .add_message::<AudioRequest>()
            .subscribe(EventKind::SettingsKeyPressed, toggle_pause)
            .add_systems(Startup, setup_camera)
            .add_systems(PostStartup, finish_boot)
            .add_systems(Update, log_audio_requests);

        if !app.world().contains_resource::<RunConfig>() {
            app.insert_resource(RunConfig::from_args());
        }
    }
}
