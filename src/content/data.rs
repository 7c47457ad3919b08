//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::areas::AreaTuning;
use crate::combat::{CombatTuning, Team};
use crate::movement::MovementTuning;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Animations (shared by characters and enemies)
// ============================================================================

/// A named frame sequence the sprite layer plays back by key.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct AnimationDef {
    pub key: String,
    pub frames: u32,
    pub frame_delay: f32,
}

impl AnimationDef {
    /// Seconds a single playthrough takes.
    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.frame_delay
    }
}

// ============================================================================
// Bullets (embedded in attack types and spell cards)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct BulletDef {
    pub damage: i32,
    pub speed: f32,
    /// Seconds of flight before the bullet is removed
    pub flight_time: f32,
    pub size: f32,
}

// ============================================================================
// Characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    pub base_hp: i32,
    pub base_mana: i32,
    pub body_width: f32,
    pub body_height: f32,
    /// Exactly two entries are used: `type1` then `type2`
    pub attack_types: Vec<AttackTypeDef>,
    pub animations: CharacterAnimations,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct AttackTypeDef {
    pub id: String,
    /// Seconds between shots; `None` means the type never fires on its own
    pub fire_interval: Option<f32>,
    pub bullet: BulletDef,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CharacterAnimations {
    pub stand: AnimationDef,
    pub run: AnimationDef,
    pub jump: AnimationDef,
    pub dash: AnimationDef,
    pub hit: AnimationDef,
}

// ============================================================================
// Enemies (enemies.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub body_width: f32,
    pub body_height: f32,
    /// Horizontal velocity added per run step
    pub run_impulse: f32,
    pub run_interval: f32,
    pub max_speed: f32,
    pub detection_width: f32,
    pub detection_height: f32,
    pub patrol_interval: f32,
    pub alert_interval: f32,
    pub boss: bool,
    pub run_animation: AnimationDef,
}

// ============================================================================
// Spell Cards (spell_cards.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect, Default)]
pub enum StyleKind {
    /// Lanes of bullets travelling side by side toward the aim
    #[default]
    Parallel,
    /// Even fan spread around the aim
    Scatter,
    /// Fan alternating between odd and even bullet counts per volley
    OddEven,
}

/// Everything the emitter needs to produce one spell-card or launcher pattern.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct SpellCardStyle {
    pub kind: StyleKind,
    /// Seconds between volleys
    pub interval: f32,
    /// Volleys before the pattern ends; zero repeats forever
    pub volleys: u32,
    pub bullets_per_volley: u32,
    /// Total fan angle for Scatter and OddEven
    pub spread_degrees: f32,
    /// Lane distance for Parallel
    pub spacing: f32,
    pub bullet: BulletDef,
    /// Side the bullets belong to; opposing bodies are the ones they can hit
    pub team: Team,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct SpellCardDef {
    pub id: String,
    pub name: String,
    pub mana_cost: i32,
    pub style: SpellCardStyle,
}

// ============================================================================
// Items (items.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub enum ItemEffect {
    HpDelta(i32),
    ManaDelta(i32),
    /// Throws a rideable broom forward; it breaks on the first ground contact
    ThrowBroom { speed: f32, width: f32 },
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub effect: ItemEffect,
}

// ============================================================================
// Gameplay Defaults (gameplay_defaults.ron) - Single struct, not a list
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect, Resource)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    /// Character ids in play, first one starts active
    pub party: Vec<String>,
    /// Launcher pattern used by every launcher point in the map
    pub launcher_style: SpellCardStyle,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub combat: CombatTuning,
    #[serde(default)]
    pub area: AreaTuning,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            party: Vec::new(),
            launcher_style: SpellCardStyle {
                kind: StyleKind::Parallel,
                interval: 1.0,
                volleys: 0,
                bullets_per_volley: 3,
                spread_degrees: 0.0,
                spacing: 12.0,
                bullet: BulletDef {
                    damage: 10,
                    speed: 200.0,
                    flight_time: 3.0,
                    size: 8.0,
                },
                team: Team::Enemy,
            },
            movement: MovementTuning::default(),
            combat: CombatTuning::default(),
            area: AreaTuning::default(),
        }
    }
}
