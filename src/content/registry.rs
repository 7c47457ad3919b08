//! ContentRegistry resource providing HashMap lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded game content.
/// Provides O(1) lookup by id for any content type.
#[derive(Resource, Default)]
pub struct ContentRegistry {
    pub characters: HashMap<String, CharacterDef>,
    pub enemies: HashMap<String, EnemyDef>,
    pub spell_cards: HashMap<String, SpellCardDef>,
    pub items: HashMap<String, ItemDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Characters: {}\n\
             - Enemies: {}\n\
             - Spell Cards: {}\n\
             - Items: {}",
            self.characters.len(),
            self.enemies.len(),
            self.spell_cards.len(),
            self.items.len(),
        )
    }
}
