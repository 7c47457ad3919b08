//! Combat domain: tuning resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct CombatTuning {
    /// Damage the player takes from touching an enemy body
    pub contact_damage: i32,
    pub spark_lifetime: f32,
    pub spark_size: f32,
    /// Distance in front of the shooter where bullets appear
    pub muzzle_offset: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            contact_damage: 10,
            spark_lifetime: 0.3,
            spark_size: 10.0,
            muzzle_offset: 30.0,
        }
    }
}
