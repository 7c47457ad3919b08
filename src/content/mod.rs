//! Content domain: RON definitions, the content registry, and stage maps.

mod data;
mod loader;
mod map;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::*;
pub use loader::{ContentLoadError, load_all_content, load_stage_map};
pub use map::{MapObject, MapPoint, MapProperty, StageMap};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content, validate_stage};

use std::path::Path;

use bevy::prelude::*;

use crate::areas::AreaTuning;
use crate::combat::CombatTuning;
use crate::core::RunConfig;
use crate::movement::MovementTuning;

const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterDef>()
            .register_type::<EnemyDef>()
            .register_type::<SpellCardDef>()
            .register_type::<ItemDef>()
            .register_type::<GameplayDefaults>()
            .init_resource::<ContentRegistry>()
            .init_resource::<GameplayDefaults>()
            .init_resource::<StageMap>()
            .add_systems(Startup, (load_content, load_stage).chain());
    }
}

fn load_content(mut commands: Commands) {
    match load_all_content(Path::new(CONTENT_DIR)) {
        Ok((registry, defaults)) => {
            info!("{}", registry.summary());
            debug!(
                "Single jump reaches {:.0} units",
                defaults.movement.single_jump_height()
            );
            for error in validate_content(&registry, &defaults) {
                warn!("Content validation: {}", error);
            }
            commands.insert_resource(defaults.movement.clone());
            commands.insert_resource(defaults.combat.clone());
            commands.insert_resource(defaults.area.clone());
            commands.insert_resource(registry);
            commands.insert_resource(defaults);
        }
        Err(errors) => {
            for error in &errors {
                error!("{}", error);
            }
            warn!("Content failed to load; continuing with built-in tuning");
            commands.insert_resource(MovementTuning::default());
            commands.insert_resource(CombatTuning::default());
            commands.insert_resource(AreaTuning::default());
        }
    }
}

fn load_stage(
    mut commands: Commands,
    run_config: Res<RunConfig>,
    registry: Res<ContentRegistry>,
) {
    match load_stage_map(&run_config.stage_path) {
        Ok(stage) => {
            if stage.is_empty() {
                warn!("Stage '{}' has no objects", run_config.stage_path.display());
            }
            for error in validate_stage(&stage, &registry) {
                warn!("Stage validation: {}", error);
            }
            commands.insert_resource(stage);
        }
        Err(e) => error!("{}", e),
    }
}
