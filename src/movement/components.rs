//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid static geometry
    Ground,
    /// Polyline platforms passable from below
    OneWayPlatform,
    Player,
    Enemy,
    /// Bullets that can only hit enemies
    PlayerBullet,
    /// Bullets that can only hit the player
    EnemyBullet,
    /// Moving platforms and the thrown broom
    Elevator,
    /// Story triggers, sensors only
    EventPoint,
    /// Enemy detection boxes, sensors only
    Detection,
}

/// Horizontal facing of a character.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`. Ties face right.
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Marker for solid static colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for one-way polyline platforms
#[derive(Component, Debug)]
pub struct OneWayPlatform;

/// Mirror the sprite to match facing.
pub(crate) fn sync_sprite_facing(mut query: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in &mut query {
        sprite.flip_x = *facing == Facing::Left;
    }
}
