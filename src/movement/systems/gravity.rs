//! Movement domain: world gravity follows tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::MovementTuning;

pub(crate) fn sync_gravity(tuning: Res<MovementTuning>, mut gravity: ResMut<Gravity>) {
    if !tuning.is_changed() {
        return;
    }
    gravity.0 = Vec2::NEG_Y * tuning.gravity;
    debug!("Gravity set to {}", tuning.gravity);
}
