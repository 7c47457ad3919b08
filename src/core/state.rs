//! Core domain: game state definitions for the stage flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    /// Content and map loading
    #[default]
    Boot,
    /// Stage simulation running
    Playing,
    /// Settings overlay open; virtual time is paused
    Paused,
}
