//! Combat domain: AI modules for enemies.

pub(crate) mod enemy;

pub use enemy::{
    EnemyBrain, EnemyIntervals, EnemyMode, EnemyTimer, ModeDescriptor, PatrolChoice,
    mode_descriptor, roll_patrol,
};
pub(crate) use enemy::update_enemy_brains;
