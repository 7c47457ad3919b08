//! Movement domain: velocity rules for unit-mass characters.
//!
//! Impulses act on bodies of mass 1, so an impulse is a direct velocity change.

use bevy::prelude::*;

use crate::movement::{Facing, MovementTuning};

/// Horizontal velocity after one tick of held input toward `facing`.
///
/// Moving the other way faster than the reversal threshold first snaps to the small
/// reversal speed in the new direction, then acceleration is capped by the distance
/// left to max speed.
pub fn run_step(vx: f32, facing: Facing, tuning: &MovementTuning, dt: f32) -> f32 {
    let dir = facing.sign();
    let mut vx = vx;

    if vx * dir < -tuning.reversal_threshold {
        vx = tuning.reversal_speed * dir;
    }

    let along = vx * dir;
    if along < tuning.max_speed {
        let gain = (tuning.acceleration() * dt).min(tuning.max_speed - along);
        vx += gain * dir;
    }
    vx
}

/// Horizontal velocity right after a held direction is released while walking.
pub fn release_step(vx: f32, tuning: &MovementTuning) -> f32 {
    if tuning.release_damping > 0.0 {
        vx / tuning.release_damping
    } else {
        vx
    }
}

/// Vertical speed is discarded before the upward impulse.
pub fn jump_velocity(velocity: Vec2, tuning: &MovementTuning) -> Vec2 {
    Vec2::new(velocity.x, tuning.jump_impulse)
}

/// Vertical speed is discarded and a horizontal impulse is added along `facing`.
pub fn dash_velocity(velocity: Vec2, facing: Facing, tuning: &MovementTuning) -> Vec2 {
    Vec2::new(velocity.x + tuning.dash_impulse * facing.sign(), 0.0)
}
