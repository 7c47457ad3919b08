//! Content domain: tests for RON parsing, stage maps, and validation.

use bevy::prelude::*;

use super::loader::{parse_data_file, parse_single};
use super::*;

const CHARACTERS: &str = r#"
(
    schema_version: 1,
    items: [
        (
            id: "reimu",
            name: "Reimu",
            base_hp: 100,
            base_mana: 100,
            body_width: 24.0,
            body_height: 40.0,
            attack_types: [
                (
                    id: "type1",
                    fire_interval: 0.5,
                    bullet: (damage: 10, speed: 400.0, flight_time: 1.5, size: 8.0),
                ),
                (
                    id: "type2",
                    fire_interval: None,
                    bullet: (damage: 4, speed: 600.0, flight_time: 1.0, size: 6.0),
                ),
            ],
            animations: (
                stand: (key: "reimu_stand", frames: 4, frame_delay: 0.15),
                run: (key: "reimu_run", frames: 6, frame_delay: 0.1),
                jump: (key: "reimu_jump", frames: 4, frame_delay: 0.1),
                dash: (key: "reimu_dash", frames: 2, frame_delay: 0.1),
                hit: (key: "reimu_hit", frames: 2, frame_delay: 0.2),
            ),
        ),
    ],
)
"#;

const STAGE: &str = r#"
{
    "layers": [
        {
            "name": "area",
            "objects": [
                { "name": "A", "x": 0, "y": 0, "width": 500, "height": 400,
                  "properties": [ { "name": "bgm", "value": "forest.ogg" },
                                  { "name": "background", "value": "" } ] },
                { "name": "broken", "x": "nope" }
            ]
        },
        {
            "name": "physics",
            "objects": [
                { "name": "ledge", "x": 100, "y": 200,
                  "polyline": [ { "x": 0, "y": 0 }, { "x": 50, "y": 10 } ] }
            ]
        },
        {
            "name": "enemy",
            "objects": [
                { "name": "e1", "type": "opossum", "x": 50, "y": 20 },
                { "name": "e2", "x": 60, "y": 20,
                  "properties": [ { "name": "tag", "value": "ghost" },
                                  { "name": "boss", "value": true } ] }
            ]
        }
    ]
}
"#;

// -----------------------------------------------------------------------------
// RON tests
// -----------------------------------------------------------------------------

#[test]
fn test_parse_characters() {
    let characters: Vec<CharacterDef> =
        parse_data_file(CHARACTERS, "characters.ron").expect("characters parse");
    assert_eq!(characters.len(), 1);

    let reimu = &characters[0];
    assert_eq!(reimu.id, "reimu");
    assert_eq!(reimu.attack_types.len(), 2);
    assert_eq!(reimu.attack_types[0].fire_interval, Some(0.5));
    assert_eq!(reimu.attack_types[1].fire_interval, None);
    assert!((reimu.animations.jump.duration() - 0.4).abs() < 1e-6);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_data_file::<CharacterDef>("(schema_version: 1, items: [(id: 3)])", "bad.ron")
        .expect_err("should fail");
    assert_eq!(err.file, "bad.ron");
    assert!(err.to_string().starts_with("Failed to load bad.ron"));
}

#[test]
fn test_gameplay_defaults_fill_missing_tuning() {
    let defaults: GameplayDefaults = parse_single(
        r#"(
            schema_version: 1,
            party: ["reimu", "marisa"],
            launcher_style: (
                kind: Scatter,
                interval: 2.0,
                volleys: 0,
                bullets_per_volley: 5,
                spread_degrees: 90.0,
                spacing: 0.0,
                bullet: (damage: 10, speed: 150.0, flight_time: 4.0, size: 8.0),
                team: Enemy,
            ),
            movement: (max_speed: 250.0),
        )"#,
        "gameplay_defaults.ron",
    )
    .expect("defaults parse");

    assert_eq!(defaults.party, vec!["reimu", "marisa"]);
    assert_eq!(defaults.launcher_style.kind, StyleKind::Scatter);
    assert_eq!(defaults.movement.max_speed, 250.0);
    assert_eq!(defaults.movement.release_damping, 3.0);
    assert_eq!(defaults.combat.contact_damage, 10);
    assert_eq!(defaults.area.clear_event, "round_complete");
}

#[test]
fn test_item_effects_parse() {
    let items: Vec<ItemDef> = parse_data_file(
        r#"(
            schema_version: 1,
            items: [
                (id: "I1", name: "Heal", effect: HpDelta(20)),
                (id: "I3", name: "Broom", effect: ThrowBroom(speed: 250.0, width: 48.0)),
            ],
        )"#,
        "items.ron",
    )
    .expect("items parse");

    assert!(matches!(items[0].effect, ItemEffect::HpDelta(20)));
    assert!(matches!(
        items[1].effect,
        ItemEffect::ThrowBroom { speed, .. } if speed == 250.0
    ));
}

// -----------------------------------------------------------------------------
// Stage map tests
// -----------------------------------------------------------------------------

#[test]
fn test_stage_map_skips_malformed_objects() {
    let stage = StageMap::from_json_str(STAGE).expect("stage parse");
    assert_eq!(stage.group("area").len(), 1);
    assert!(stage.group("launcher").is_empty());
    assert!(!stage.is_empty());
}

#[test]
fn test_map_object_properties() {
    let stage = StageMap::from_json_str(STAGE).expect("stage parse");
    let area = stage.object("area", "A").expect("area A");

    assert_eq!(area.property_str("bgm"), Some("forest.ogg"));
    assert_eq!(area.property_str("background"), None);
    assert_eq!(area.rect(), Some(Rect::new(0.0, 0.0, 500.0, 400.0)));

    let enemies = stage.group("enemy");
    assert_eq!(enemies[0].tag(), Some("opossum"));
    assert_eq!(enemies[1].tag(), Some("ghost"));
    assert!(enemies[1].property_bool("boss"));
    assert!(!enemies[0].property_bool("boss"));
}

#[test]
fn test_polyline_points_flip_to_world_space() {
    let stage = StageMap::from_json_str(STAGE).expect("stage parse");
    let ledge = stage.object("physics", "ledge").expect("ledge");

    assert_eq!(
        ledge.polyline_world(),
        Some(vec![Vec2::new(100.0, 200.0), Vec2::new(150.0, 190.0)])
    );
    assert_eq!(ledge.polygon_world(), None);
    assert_eq!(ledge.rect(), None);
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(StageMap::from_json_str("{ not json").is_err());
    assert!(StageMap::from_json_str("{}").expect("empty map").is_empty());
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_validate_content_reports_missing_party_member() {
    let mut registry = ContentRegistry::default();
    let characters: Vec<CharacterDef> =
        parse_data_file(CHARACTERS, "characters.ron").expect("characters parse");
    for c in characters {
        registry.characters.insert(c.id.clone(), c);
    }
    let defaults = GameplayDefaults {
        party: vec!["reimu".to_string(), "sanae".to_string()],
        ..default()
    };

    let errors = validate_content(&registry, &defaults);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_id, "sanae");
}

#[test]
fn test_validate_stage_reports_unknown_enemy_tags() {
    let stage = StageMap::from_json_str(STAGE).expect("stage parse");
    let registry = ContentRegistry::default();

    let errors = validate_stage(&stage, &registry);
    let missing: Vec<_> = errors.iter().map(|e| e.missing_id.as_str()).collect();
    assert_eq!(missing, vec!["opossum", "ghost"]);
}
