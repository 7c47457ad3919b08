//! Validation for cross-references between content definitions and the stage map.

use super::data::*;
use super::map::StageMap;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub target_type: &'static str,
    pub missing_id: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' references missing {} '{}' in field '{}'",
            self.source_type, self.source_id, self.target_type, self.missing_id, self.field
        )
    }
}

/// Helper macro for checking a reference exists
macro_rules! check_ref {
    ($errors:expr, $registry_map:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$registry_map.contains_key($ref_id) {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

/// Validate all cross-references in the registry.
/// Returns a list of validation errors, empty if all references are valid.
pub fn validate_content(
    registry: &ContentRegistry,
    defaults: &GameplayDefaults,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for member in &defaults.party {
        check_ref!(
            errors,
            registry.characters,
            "GameplayDefaults",
            "party",
            "party",
            "Character",
            member
        );
    }

    // Both attack slots must exist
    for (id, character) in &registry.characters {
        if character.attack_types.len() < 2 {
            errors.push(ValidationError {
                source_type: "Character",
                source_id: id.clone(),
                field: "attack_types",
                target_type: "AttackType",
                missing_id: format!("type{}", character.attack_types.len() + 1),
            });
        }
    }

    errors
}

/// Validate the enemy tags a stage spawns against the registry.
pub fn validate_stage(stage: &StageMap, registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for object in stage.group("enemy") {
        if let Some(tag) = object.tag() {
            check_ref!(
                errors,
                registry.enemies,
                "MapObject",
                object.name,
                "tag",
                "Enemy",
                tag
            );
        }
    }

    errors
}
