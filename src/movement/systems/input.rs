//! Movement domain: keyboard sampling, published as bus events.

use bevy::prelude::*;

use crate::core::{GameEvent, PublishExt};

const LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const JUMP: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const DASH: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];

const ITEM_KEYS: [(KeyCode, &str); 3] = [
    (KeyCode::Digit1, "I1"),
    (KeyCode::Digit2, "I2"),
    (KeyCode::Digit3, "I3"),
];
const SPELL_CARD_KEYS: [(KeyCode, &str); 2] = [(KeyCode::KeyQ, "C1"), (KeyCode::KeyE, "C2")];

/// Direction keys, actions, items, and spell cards.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    let left_held = keyboard.any_pressed(LEFT);
    let right_held = keyboard.any_pressed(RIGHT);

    if keyboard.any_just_pressed(LEFT) {
        commands.publish(GameEvent::LeftKeyPressed);
    }
    if keyboard.any_just_pressed(RIGHT) {
        commands.publish(GameEvent::RightKeyPressed);
    }
    // Releasing one direction while the other is held resumes the held one
    if keyboard.any_just_released(LEFT) || keyboard.any_just_released(RIGHT) {
        commands.publish(GameEvent::MotionKeyReleased);
        if left_held {
            commands.publish(GameEvent::LeftKeyPressed);
        } else if right_held {
            commands.publish(GameEvent::RightKeyPressed);
        }
    }

    if keyboard.any_just_pressed(JUMP) {
        commands.publish(GameEvent::JumpKeyPressed);
    }
    if keyboard.any_just_pressed(DASH) {
        commands.publish(GameEvent::DashKeyPressed);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        commands.publish(GameEvent::SwitchCharacter);
    }
    if keyboard.just_pressed(KeyCode::KeyX) {
        commands.publish(GameEvent::SwitchAttackType);
    }

    for (key, item_id) in ITEM_KEYS {
        if keyboard.just_pressed(key) {
            commands.publish(GameEvent::UseItem {
                item_id: item_id.to_string(),
            });
        }
    }
    for (key, card_id) in SPELL_CARD_KEYS {
        if keyboard.just_pressed(key) {
            commands.publish(GameEvent::UseSpellCard {
                card_id: card_id.to_string(),
            });
        }
    }
}

/// Works in every state so the pause can be lifted again.
pub(crate) fn read_settings_input(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    if keyboard.just_pressed(KeyCode::Escape) {
        commands.publish(GameEvent::SettingsKeyPressed);
    }
}
