//! Core domain: stage flow systems and setup.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::bus::GameEvent;
use crate::core::resources::{AiRng, AudioRequest, RunConfig};
use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Seed the AI random source and leave boot once content is in place.
pub(crate) fn finish_boot(
    mut commands: Commands,
    run_config: Res<RunConfig>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    commands.insert_resource(AiRng::from_seed(run_config.seed));
    info!(
        "Starting stage '{}' with seed {}",
        run_config.stage_path.display(),
        run_config.seed
    );
    game_state.set(GameState::Playing);
}

/// Bus handler for `settings_key_pressed`: toggles the pause overlay state.
pub(crate) fn toggle_pause(world: &mut World, _event: &GameEvent) {
    let Some(current) = world.get_resource::<State<GameState>>().map(|s| *s.get()) else {
        return;
    };

    let next = match current {
        GameState::Playing => GameState::Paused,
        GameState::Paused => GameState::Playing,
        GameState::Boot => return,
    };

    if let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() {
        if next == GameState::Paused {
            time.pause();
        } else {
            time.unpause();
        }
    }
    if let Some(mut next_state) = world.get_resource_mut::<NextState<GameState>>() {
        next_state.set(next);
    }
    info!("Settings toggled: {:?} -> {:?}", current, next);
}

/// Audio playback is handled outside the simulation; requests are only traced here.
pub(crate) fn log_audio_requests(mut requests: MessageReader<AudioRequest>) {
    for request in requests.read() {
        match request {
            AudioRequest::PlayMusic { track, looped } => {
                debug!("Audio: play music '{}' (loop={})", track, looped)
            }
            AudioRequest::ClearMusic => debug!("Audio: clear music"),
            AudioRequest::PlayEffect { sound_id } => debug!("Audio: effect '{}'", sound_id),
        }
    }
}
