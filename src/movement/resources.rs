//! Movement domain: tuning resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct MovementTuning {
    pub max_speed: f32,
    /// Seconds to reach `max_speed` from rest while a direction is held
    pub accelerate_time: f32,
    /// Opposing speed above which a reversal snaps to `reversal_speed` first
    pub reversal_threshold: f32,
    pub reversal_speed: f32,
    /// Horizontal velocity divisor applied when a held direction is released while walking
    pub release_damping: f32,
    pub jump_impulse: f32,
    pub dash_impulse: f32,
    pub max_jump_charges: u32,
    pub max_dash_charges: u32,
    pub jump_regen_interval: f32,
    pub dash_regen_interval: f32,
    pub gravity: f32,
    /// Seconds the Hit state lasts before returning to Stand
    pub hit_recover_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            accelerate_time: 0.3,
            reversal_threshold: 10.0,
            reversal_speed: 100.0,
            release_damping: 3.0,
            jump_impulse: 500.0,
            dash_impulse: 350.0,
            max_jump_charges: 2,
            max_dash_charges: 1,
            jump_regen_interval: 2.0,
            dash_regen_interval: 1.0,
            gravity: 1000.0,
            hit_recover_time: 0.4,
        }
    }
}

impl MovementTuning {
    /// Velocity gained per second of held input.
    pub fn acceleration(&self) -> f32 {
        if self.accelerate_time > 0.0 {
            self.max_speed / self.accelerate_time
        } else {
            f32::INFINITY
        }
    }

    /// Apex height of a jump from rest with unit mass: h = v² / (2g)
    pub fn single_jump_height(&self) -> f32 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }
}
