//! Areas domain: tuning resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct AreaTuning {
    /// Camera position relative to the active player
    pub camera_offset_x: f32,
    pub camera_offset_y: f32,
    /// Seconds between the last boss falling and the clear event
    pub boss_clear_delay: f32,
    /// Seconds an elevator waits at each end of its path
    pub elevator_pause: f32,
    /// Seconds an elevator spends on one path segment
    pub segment_time: f32,
    pub elevator_width: f32,
    pub elevator_height: f32,
    pub event_point_width: f32,
    pub event_point_height: f32,
    /// Seconds a thrown broom flies before it is removed
    pub broom_lifetime: f32,
    /// Event id published once every boss of a region is down
    pub clear_event: String,
}

impl Default for AreaTuning {
    fn default() -> Self {
        Self {
            camera_offset_x: 100.0,
            camera_offset_y: 70.0,
            boss_clear_delay: 3.0,
            elevator_pause: 1.0,
            segment_time: 1.0,
            elevator_width: 64.0,
            elevator_height: 12.0,
            event_point_width: 15.0,
            event_point_height: 25.0,
            broom_lifetime: 5.0,
            clear_event: "round_complete".to_string(),
        }
    }
}

impl AreaTuning {
    pub fn camera_offset(&self) -> Vec2 {
        Vec2::new(self.camera_offset_x, self.camera_offset_y)
    }

    pub fn elevator_size(&self) -> Vec2 {
        Vec2::new(self.elevator_width, self.elevator_height)
    }

    pub fn event_point_size(&self) -> Vec2 {
        Vec2::new(self.event_point_width, self.event_point_height)
    }
}
