//! Areas domain: camera follow clamped to the current region.

use bevy::prelude::*;

use crate::areas::AreaTuning;
use crate::player::Party;

/// Follow bounds and parallax bookkeeping for the current region.
#[derive(Resource, Debug, Default)]
pub struct CameraRig {
    pub bounds: Option<Rect>,
    /// Set on region change; the next frame records a fresh parallax origin
    pub parallax_reset: bool,
    pub parallax_origin: Vec2,
    /// Camera travel since entering the region, read by background layers
    pub parallax: Vec2,
}

impl CameraRig {
    pub fn enter_region(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        self.parallax_reset = true;
    }

    /// Camera travel since the region was entered.
    pub fn parallax_offset(&self, camera: Vec2) -> Vec2 {
        camera - self.parallax_origin
    }
}

/// Camera center for a target, kept inside `bounds` when the view fits in them.
pub fn follow_point(target: Vec2, offset: Vec2, bounds: Option<Rect>, view: Vec2) -> Vec2 {
    let desired = target + offset;
    let Some(bounds) = bounds else {
        return desired;
    };
    let half = view * 0.5;
    let mut center = desired;
    for axis in 0..2 {
        let (min, max) = (bounds.min[axis] + half[axis], bounds.max[axis] - half[axis]);
        center[axis] = if min > max {
            (bounds.min[axis] + bounds.max[axis]) * 0.5
        } else {
            desired[axis].clamp(min, max)
        };
    }
    center
}

pub(crate) fn follow_camera(
    party: Res<Party>,
    tuning: Res<AreaTuning>,
    mut rig: ResMut<CameraRig>,
    targets: Query<&Transform, Without<Camera2d>>,
    mut cameras: Query<(&Camera, &mut Transform), With<Camera2d>>,
) {
    let Some(target) = party
        .active()
        .and_then(|player| targets.get(player).ok())
        .map(|t| t.translation.truncate())
    else {
        return;
    };

    for (camera, mut transform) in &mut cameras {
        let view = camera.logical_viewport_size().unwrap_or(Vec2::ZERO);
        let center = follow_point(target, tuning.camera_offset(), rig.bounds, view);
        transform.translation.x = center.x;
        transform.translation.y = center.y;

        if rig.parallax_reset {
            rig.parallax_origin = center;
            rig.parallax_reset = false;
            debug!("Parallax origin reset to {:?}", center);
        }
        rig.parallax = rig.parallax_offset(center);
    }
}
