//! Combat domain: components and combat-related state types.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Team affiliation; bullets only hit the opposing team
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Reflect)]
pub enum Team {
    #[default]
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

/// A combat resource with `0 <= current <= base` after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Meter {
    pub current: i32,
    pub base: i32,
}

impl Meter {
    pub fn full(base: i32) -> Self {
        let base = base.max(0);
        Self {
            current: base,
            base,
        }
    }

    pub fn with_current(current: i32, base: i32) -> Self {
        let base = base.max(0);
        Self {
            current: current.clamp(0, base),
            base,
        }
    }

    /// Apply a signed change, returning the amount actually applied.
    pub fn apply(&mut self, delta: i32) -> i32 {
        let before = self.current;
        self.current = before.saturating_add(delta).clamp(0, self.base);
        self.current - before
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }
}

#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct Health(pub Meter);

impl Health {
    pub fn new(base: i32) -> Self {
        Self(Meter::full(base))
    }
}

#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct Mana(pub Meter);

impl Mana {
    pub fn new(base: i32) -> Self {
        Self(Meter::full(base))
    }
}

/// Enemy instance spawned from an `EnemyDef`
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub def_id: String,
    pub run_impulse: f32,
}

/// Counts toward the region's live-boss tally
#[derive(Component, Debug)]
pub struct Boss;

/// Projectile that damages the opposing team on contact
#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    pub damage: i32,
    pub team: Team,
}

/// Remaining seconds before the entity is removed
#[derive(Component, Debug)]
pub struct Lifetime(pub f32);

/// Transient hit effect
#[derive(Component, Debug)]
pub struct Spark;

/// Story trigger picked up by the player
#[derive(Component, Debug, Clone)]
pub struct EventPoint {
    pub event_id: String,
}

/// Child collider marking an enemy's detection box
#[derive(Component, Debug, Clone, Copy)]
pub struct DetectionSensor {
    pub owner: Entity,
}

/// Air-jump counter for enemies. Enemy behavior never jumps on its own, so the
/// count only moves when landing contacts refill it through `ContactEffect::ResetJump`.
/// Players keep their charges in the action machine instead.
#[derive(Component, Debug, Clone, Copy)]
pub struct JumpCharges {
    pub current: u32,
    pub max: u32,
}

impl JumpCharges {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}
