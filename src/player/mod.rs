//! Player domain: party roster, the action state machine, and its input handlers.

mod handlers;
mod party;
mod spawn;
mod state;
mod systems;


pub use party::{Downed, Party, PlayerCharacter};
pub use spawn::{PlayerBundle, player_layers};
pub use state::{
    ActionState, ActionTick, AnimationKey, AttackSlot, Charges, PlayerActions, PlayerTimer,
    StateDescriptor, state_descriptor,
};

use bevy::prelude::*;

use crate::core::{BusAppExt, EventKind, GameState};
use crate::player::handlers::{
    on_dash_key, on_jump_key, on_left_key, on_motion_released, on_player_hp_change,
    on_right_key, on_switch_attack_type, on_switch_character, on_use_item, on_use_spell_card,
};
use crate::player::spawn::spawn_party;
use crate::player::systems::tick_player_actions;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Party>()
            .subscribe(EventKind::LeftKeyPressed, on_left_key)
            .subscribe(EventKind::RightKeyPressed, on_right_key)
            .subscribe(EventKind::MotionKeyReleased, on_motion_released)
            .subscribe(EventKind::JumpKeyPressed, on_jump_key)
            .subscribe(EventKind::DashKeyPressed, on_dash_key)
            .subscribe(EventKind::SwitchCharacter, on_switch_character)
            .subscribe(EventKind::SwitchAttackType, on_switch_attack_type)
            .subscribe(EventKind::UseItem, on_use_item)
            .subscribe(EventKind::UseSpellCard, on_use_spell_card)
            // After the combat clamp so the hit sees the updated meter
            .subscribe(EventKind::HpChange, on_player_hp_change)
            .add_systems(OnExit(GameState::Boot), spawn_party)
            .add_systems(
                Update,
                tick_player_actions.run_if(in_state(GameState::Playing)),
            );
    }
}
