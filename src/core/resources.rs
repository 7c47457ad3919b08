//! Core domain: shared resources for stage configuration.

use std::path::PathBuf;

use bevy::ecs::message::Message;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
    /// Map authoring file for the stage, relative to the working directory
    pub stage_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
            stage_path: PathBuf::from("assets/maps/forest.json"),
        }
    }
}

impl RunConfig {
    /// Default config with the stage taken from the first command-line argument, if any.
    pub fn from_args() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::args().nth(1) {
            config.stage_path = PathBuf::from(path);
        }
        config
    }
}

/// Random source for AI rolls, seeded from [`RunConfig`] so a seed reproduces patrol choices.
#[derive(Resource, Debug)]
pub struct AiRng(pub ChaCha8Rng);

impl AiRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Fire-and-forget requests for the audio collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioRequest {
    PlayMusic { track: String, looped: bool },
    ClearMusic,
    PlayEffect { sound_id: String },
}

impl Message for AudioRequest {}
