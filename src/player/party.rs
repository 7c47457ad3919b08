//! Player domain: the roster of playable characters and which one is in control.

use bevy::prelude::*;

/// Static data a spawned character keeps for its action machine.
#[derive(Component, Debug, Clone)]
pub struct PlayerCharacter {
    pub def_id: String,
    pub jump_animation_time: f32,
    pub dash_animation_time: f32,
}

/// Marks a character whose HP reached zero.
#[derive(Component, Debug)]
pub struct Downed;

/// Characters in play. Only the active one has physics and input.
#[derive(Resource, Debug, Default)]
pub struct Party {
    members: Vec<Entity>,
    active: usize,
}

impl Party {
    pub fn new(members: Vec<Entity>) -> Self {
        Self { members, active: 0 }
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn active(&self) -> Option<Entity> {
        self.members.get(self.active).copied()
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.active() == Some(entity)
    }

    /// Outgoing and incoming character of the next switch.
    pub fn next_pair(&self) -> Option<(Entity, Entity)> {
        if self.members.len() < 2 {
            return None;
        }
        let outgoing = self.members[self.active];
        let incoming = self.members[(self.active + 1) % self.members.len()];
        Some((outgoing, incoming))
    }

    /// Hand control to the next member in roster order.
    pub fn advance(&mut self) -> Option<Entity> {
        if self.members.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.members.len();
        self.active()
    }
}
