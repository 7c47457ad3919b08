//! Player domain: party spawning at the stage's birth point.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{ContactKind, Health, Mana, Team};
use crate::content::{CharacterDef, ContentRegistry, GameplayDefaults, StageMap};
use crate::movement::{Facing, GameLayer, MovementTuning};
use crate::player::party::{Party, PlayerCharacter};
use crate::player::state::{AttackSlot, PlayerActions};

const FALLBACK_BIRTH_POINT: Vec2 = Vec2::new(100.0, 200.0);

pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Player,
        [
            GameLayer::Ground,
            GameLayer::OneWayPlatform,
            GameLayer::Enemy,
            GameLayer::EnemyBullet,
            GameLayer::Elevator,
            GameLayer::EventPoint,
            GameLayer::Detection,
        ],
    )
}

/// Bundle for one playable character
#[derive(Bundle)]
pub struct PlayerBundle {
    pub character: PlayerCharacter,
    pub actions: PlayerActions,
    pub kind: ContactKind,
    pub team: Team,
    pub health: Health,
    pub mana: Mana,
    pub facing: Facing,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub friction: Friction,
    pub locked_axes: LockedAxes,
}

impl PlayerBundle {
    pub fn new(def: &CharacterDef, position: Vec2, tuning: &MovementTuning) -> Self {
        let size = Vec2::new(def.body_width, def.body_height);
        let attacks = def.attack_types.iter().map(AttackSlot::from).collect();
        Self {
            character: PlayerCharacter {
                def_id: def.id.clone(),
                jump_animation_time: def.animations.jump.duration(),
                dash_animation_time: def.animations.dash.duration(),
            },
            actions: PlayerActions::new(attacks, tuning),
            kind: ContactKind::Player,
            team: Team::Player,
            health: Health::new(def.base_hp),
            mana: Mana::new(def.base_mana),
            facing: Facing::Right,
            sprite: Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 5.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            collision_layers: player_layers(),
            velocity: LinearVelocity::default(),
            friction: Friction::new(0.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

/// Spawn every party member at `birthPoint`. Only the first one starts in play.
pub(crate) fn spawn_party(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    defaults: Res<GameplayDefaults>,
    stage: Res<StageMap>,
    tuning: Res<MovementTuning>,
    existing: Query<Entity, With<PlayerCharacter>>,
) {
    if !existing.is_empty() {
        return;
    }

    let birth_point = stage
        .object("player", "birthPoint")
        .and_then(|o| o.position())
        .unwrap_or_else(|| {
            warn!("No birthPoint in stage, using {:?}", FALLBACK_BIRTH_POINT);
            FALLBACK_BIRTH_POINT
        });

    let mut members = Vec::new();
    for id in &defaults.party {
        let Some(def) = registry.characters.get(id) else {
            warn!("Party member '{}' is not a known character", id);
            continue;
        };

        let mut bundle = PlayerBundle::new(def, birth_point, &tuning);
        let mut entity = if members.is_empty() {
            bundle.actions.start_attack();
            commands.spawn(bundle)
        } else {
            bundle.actions.bench();
            let mut entity = commands.spawn(bundle);
            entity.insert((RigidBodyDisabled, ColliderDisabled, Visibility::Hidden));
            entity
        };
        entity.insert(Name::new(def.name.clone()));
        members.push(entity.id());
        info!("Spawned character '{}' at {:?}", def.id, birth_point);
    }

    if members.is_empty() {
        warn!("Party is empty, nothing is controllable");
    }
    commands.insert_resource(Party::new(members));
}
