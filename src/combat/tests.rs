//! Combat domain: tests for meters, contact resolution, enemy behavior, and emitters.

use bevy::prelude::*;

use super::*;
use crate::areas::Riders;
use crate::content::{BulletDef, SpellCardStyle, StyleKind};
use crate::core::{DamageInfo, EventBus, EventKind, GameEvent, publish};
use crate::movement::Facing;

fn entities(world: &mut World, count: usize) -> Vec<Entity> {
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

#[derive(Resource, Default)]
struct Seen(Vec<GameEvent>);

fn record(world: &mut World, event: &GameEvent) {
    world.resource_mut::<Seen>().0.push(event.clone());
}

// -----------------------------------------------------------------------------
// Meter tests
// -----------------------------------------------------------------------------

#[test]
fn test_meter_stays_in_bounds_for_any_delta() {
    for delta in [i32::MIN, -1000, -31, -1, 0, 1, 29, 1000, i32::MAX] {
        let mut meter = Meter::with_current(30, 100);
        meter.apply(delta);
        assert!(
            (0..=100).contains(&meter.current),
            "delta {} left {}",
            delta,
            meter.current
        );
    }
}

#[test]
fn test_meter_reports_applied_amount() {
    let mut meter = Meter::with_current(90, 100);
    assert_eq!(meter.apply(20), 10);
    assert_eq!(meter.current, 100);
    assert_eq!(meter.apply(-150), -100);
    assert!(meter.is_empty());
}

#[test]
fn test_meter_with_current_clamps() {
    assert_eq!(Meter::with_current(150, 100).current, 100);
    assert_eq!(Meter::with_current(-5, 100).current, 0);
    assert_eq!(Meter::full(-10).base, 0);
}

#[test]
fn test_team_opponent() {
    assert_eq!(Team::Player.opponent(), Team::Enemy);
    assert_eq!(Team::Enemy.opponent(), Team::Player);
}

// -----------------------------------------------------------------------------
// Contact resolution tests
// -----------------------------------------------------------------------------

#[test]
fn test_resolution_is_symmetric() {
    let mut world = World::new();
    let e = entities(&mut world, 8);
    let bodies = [
        ContactBody::new(e[0], BodyKind::Player),
        ContactBody::new(e[1], BodyKind::Enemy),
        ContactBody::detection(e[1]),
        ContactBody::new(
            e[2],
            BodyKind::Bullet {
                damage: 5,
                team: Team::Player,
            },
        ),
        ContactBody::new(
            e[3],
            BodyKind::Bullet {
                damage: 7,
                team: Team::Enemy,
            },
        ),
        ContactBody::new(e[4], BodyKind::Elevator),
        ContactBody::new(
            e[5],
            BodyKind::EventPoint {
                event_id: "E1".to_string(),
            },
        ),
        ContactBody::new(e[6], BodyKind::Ground),
        ContactBody::new(e[7], BodyKind::OneWayPlatform),
    ];
    let normals = [Vec2::Y, Vec2::NEG_Y, Vec2::X, Vec2::new(0.6, -0.8)];

    for a in &bodies {
        for b in &bodies {
            for n in normals {
                assert_eq!(
                    resolve_begin(a, b, n, 10),
                    resolve_begin(b, a, -n, 10),
                    "{:?} vs {:?} with {:?}",
                    a.kind,
                    b.kind,
                    n
                );
                assert_eq!(resolve_separate(a, b), resolve_separate(b, a));
            }
        }
    }
}

#[test]
fn test_one_way_platform_accepts_landing_from_above() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let player = ContactBody::new(e[0], BodyKind::Player);
    let platform = ContactBody::new(e[1], BodyKind::OneWayPlatform);

    // Player above the platform: the normal from player to platform points down
    let landing = resolve_begin(&player, &platform, Vec2::NEG_Y, 10);
    assert!(landing.accept);
    assert_eq!(landing.effects, vec![ContactEffect::ResetJump(e[0])]);

    // Same contact seen from the platform side
    let flipped = resolve_begin(&platform, &player, Vec2::Y, 10);
    assert_eq!(flipped, landing);
}

#[test]
fn test_one_way_platform_rejects_from_below_and_side() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let enemy = ContactBody::new(e[0], BodyKind::Enemy);
    let platform = ContactBody::new(e[1], BodyKind::OneWayPlatform);

    for normal in [Vec2::Y, Vec2::X, Vec2::NEG_X] {
        let resolution = resolve_begin(&enemy, &platform, normal, 10);
        assert!(!resolution.accept);
        assert!(resolution.effects.is_empty());
    }
}

#[test]
fn test_elevator_landing_registers_rider() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let player = ContactBody::new(e[0], BodyKind::Player);
    let elevator = ContactBody::new(e[1], BodyKind::Elevator);

    let resolution = resolve_begin(&player, &elevator, Vec2::NEG_Y, 10);
    assert!(resolution.accept);
    assert_eq!(
        resolution.effects,
        vec![
            ContactEffect::ResetJump(e[0]),
            ContactEffect::AddRider {
                elevator: e[1],
                rider: e[0],
            },
        ]
    );

    assert_eq!(
        resolve_separate(&elevator, &player),
        vec![ContactEffect::RemoveRider {
            elevator: e[1],
            rider: e[0],
        }]
    );
}

#[test]
fn test_player_bullet_hits_enemy() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let enemy = ContactBody::new(e[0], BodyKind::Enemy);
    let bullet = ContactBody::new(
        e[1],
        BodyKind::Bullet {
            damage: 12,
            team: Team::Player,
        },
    );

    let resolution = resolve_begin(&bullet, &enemy, Vec2::X, 10);
    assert!(resolution.accept);
    assert_eq!(
        resolution.effects,
        vec![
            ContactEffect::SpawnSpark { at: e[0] },
            ContactEffect::Publish(GameEvent::BulletHitEnemy(DamageInfo {
                damage: 12,
                target: e[0],
            })),
            ContactEffect::Despawn(e[1]),
        ]
    );
}

#[test]
fn test_bullets_ignore_their_own_team() {
    let mut world = World::new();
    let e = entities(&mut world, 3);
    let enemy = ContactBody::new(e[0], BodyKind::Enemy);
    let player = ContactBody::new(e[1], BodyKind::Player);
    let enemy_bullet = ContactBody::new(
        e[2],
        BodyKind::Bullet {
            damage: 5,
            team: Team::Enemy,
        },
    );
    let player_bullet = ContactBody::new(
        e[2],
        BodyKind::Bullet {
            damage: 5,
            team: Team::Player,
        },
    );

    assert_eq!(
        resolve_begin(&enemy, &enemy_bullet, Vec2::X, 10),
        Resolution::accept()
    );
    assert_eq!(
        resolve_begin(&player, &player_bullet, Vec2::X, 10),
        Resolution::accept()
    );
}

#[test]
fn test_enemy_body_contact_damages_player() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let player = ContactBody::new(e[0], BodyKind::Player);
    let enemy = ContactBody::new(e[1], BodyKind::Enemy);

    let resolution = resolve_begin(&player, &enemy, Vec2::X, 10);
    assert_eq!(
        resolution.effects,
        vec![ContactEffect::Publish(GameEvent::BulletHitPlayer(
            DamageInfo {
                damage: 10,
                target: e[0],
            }
        ))]
    );
}

#[test]
fn test_detection_range_only_reacts_to_player() {
    let mut world = World::new();
    let e = entities(&mut world, 3);
    let sensor = ContactBody::detection(e[0]);
    let player = ContactBody::new(e[1], BodyKind::Player);
    let ground = ContactBody::new(e[2], BodyKind::Ground);

    assert_eq!(
        resolve_begin(&player, &sensor, Vec2::X, 10).effects,
        vec![ContactEffect::DetectPlayer { enemy: e[0] }]
    );
    assert_eq!(
        resolve_begin(&sensor, &ground, Vec2::NEG_Y, 10),
        Resolution::accept()
    );
    assert!(resolve_separate(&sensor, &player).is_empty());
}

#[test]
fn test_event_point_is_consumed_by_player() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let player = ContactBody::new(e[0], BodyKind::Player);
    let point = ContactBody::new(
        e[1],
        BodyKind::EventPoint {
            event_id: "talk_01".to_string(),
        },
    );

    assert_eq!(
        resolve_begin(&point, &player, Vec2::ZERO, 10).effects,
        vec![
            ContactEffect::Publish(GameEvent::TriggerEvent {
                event_id: "talk_01".to_string(),
            }),
            ContactEffect::Despawn(e[1]),
        ]
    );
}

#[test]
fn test_elevator_breaks_on_ground() {
    let mut world = World::new();
    let e = entities(&mut world, 2);
    let broom = ContactBody::new(e[0], BodyKind::Elevator);
    let ground = ContactBody::new(e[1], BodyKind::Ground);

    assert_eq!(
        resolve_begin(&ground, &broom, Vec2::Y, 10).effects,
        vec![ContactEffect::Despawn(e[0])]
    );
}

#[test]
fn test_untagged_and_unknown_pairs_accept_without_effects() {
    let mut world = World::new();
    let e = entities(&mut world, 3);
    let untagged = ContactBody::new(e[0], BodyKind::Untagged);
    let player = ContactBody::new(e[1], BodyKind::Player);
    let ground = ContactBody::new(e[2], BodyKind::Ground);

    assert_eq!(
        resolve_begin(&untagged, &player, Vec2::NEG_Y, 10),
        Resolution::accept()
    );
    assert_eq!(
        resolve_begin(&player, &ground, Vec2::NEG_Y, 10),
        Resolution::accept()
    );
}

// -----------------------------------------------------------------------------
// Contact effect application tests
// -----------------------------------------------------------------------------

#[test]
fn test_apply_reset_jump_refills_enemy_charges() {
    let mut world = World::new();
    let enemy = world.spawn(JumpCharges { current: 0, max: 1 }).id();

    apply_contact_effect(&mut world, ContactEffect::ResetJump(enemy));

    assert_eq!(world.get::<JumpCharges>(enemy).map(|j| j.current), Some(1));
}

#[test]
fn test_apply_rider_effects() {
    let mut world = World::new();
    let rider = world.spawn_empty().id();
    let elevator = world.spawn(Riders::default()).id();

    apply_contact_effect(&mut world, ContactEffect::AddRider { elevator, rider });
    apply_contact_effect(&mut world, ContactEffect::AddRider { elevator, rider });
    assert_eq!(world.get::<Riders>(elevator).map(|r| r.members().len()), Some(1));

    apply_contact_effect(&mut world, ContactEffect::RemoveRider { elevator, rider });
    assert_eq!(world.get::<Riders>(elevator).map(|r| r.members().len()), Some(0));
}

#[test]
fn test_apply_effects_on_missing_entities_are_noops() {
    let mut world = World::new();
    let gone = world.spawn_empty().id();
    world.despawn(gone);

    apply_contact_effect(&mut world, ContactEffect::Despawn(gone));
    apply_contact_effect(&mut world, ContactEffect::ResetJump(gone));
    apply_contact_effect(&mut world, ContactEffect::DetectPlayer { enemy: gone });
    apply_contact_effect(&mut world, ContactEffect::SpawnSpark { at: gone });
}

#[test]
fn test_apply_detect_player_alerts_enemy() {
    let mut world = World::new();
    let enemy = world.spawn(EnemyBrain::new(EnemyIntervals::default())).id();

    apply_contact_effect(&mut world, ContactEffect::DetectPlayer { enemy });

    assert_eq!(
        world.get::<EnemyBrain>(enemy).map(EnemyBrain::mode),
        Some(EnemyMode::Alert)
    );
}

// -----------------------------------------------------------------------------
// Damage handler tests
// -----------------------------------------------------------------------------

fn combat_world() -> World {
    let mut world = World::new();
    let mut bus = EventBus::default();
    bus.subscribe(EventKind::BulletHitEnemy, super::on_bullet_hit_enemy);
    bus.subscribe(EventKind::BulletHitPlayer, super::on_bullet_hit_player);
    bus.subscribe(EventKind::HpChange, super::on_hp_change);
    bus.subscribe(EventKind::ManaChange, super::on_mana_change);
    bus.subscribe(EventKind::KillBoss, record);
    world.insert_resource(bus);
    world.init_resource::<Seen>();
    world
}

fn enemy(hp: i32) -> (Enemy, Health) {
    (
        Enemy {
            def_id: "opossum".to_string(),
            run_impulse: 30.0,
        },
        Health::new(hp),
    )
}

#[test]
fn test_enemy_destroyed_exactly_on_third_hit() {
    let mut world = combat_world();
    let target = world.spawn(enemy(30)).id();
    let hit = GameEvent::BulletHitEnemy(DamageInfo { damage: 10, target });

    publish(&mut world, hit.clone());
    assert_eq!(world.get::<Health>(target).map(|h| h.current), Some(20));
    publish(&mut world, hit.clone());
    assert_eq!(world.get::<Health>(target).map(|h| h.current), Some(10));
    publish(&mut world, hit.clone());
    assert!(world.get_entity(target).is_err());

    // Late hits on the removed enemy are ignored
    publish(&mut world, hit);
    assert!(world.resource::<Seen>().0.is_empty());
}

#[test]
fn test_boss_death_publishes_kill_boss() {
    let mut world = combat_world();
    let target = world.spawn((enemy(10), Boss)).id();

    publish(
        &mut world,
        GameEvent::BulletHitEnemy(DamageInfo { damage: 25, target }),
    );

    assert_eq!(
        world.resource::<Seen>().0,
        vec![GameEvent::KillBoss { boss: target }]
    );
}

#[test]
fn test_bullet_hit_player_goes_through_hp_change() {
    let mut world = combat_world();
    let player = world.spawn(Health::new(100)).id();

    publish(
        &mut world,
        GameEvent::BulletHitPlayer(DamageInfo {
            damage: 10,
            target: player,
        }),
    );
    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(90));

    publish(
        &mut world,
        GameEvent::BulletHitPlayer(DamageInfo {
            damage: 500,
            target: player,
        }),
    );
    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(0));
}

#[test]
fn test_bullet_hit_enemy_ignores_non_enemies() {
    let mut world = combat_world();
    let player = world.spawn(Health::new(30)).id();

    publish(
        &mut world,
        GameEvent::BulletHitEnemy(DamageInfo {
            damage: 30,
            target: player,
        }),
    );

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(30));
}

// -----------------------------------------------------------------------------
// Enemy behavior tests
// -----------------------------------------------------------------------------

fn brain_intervals() -> EnemyIntervals {
    EnemyIntervals {
        patrol: 1.0,
        alert: 0.5,
        run: 0.125,
    }
}

#[test]
fn test_roll_patrol_weights() {
    let choices: Vec<_> = (0..100).map(roll_patrol).collect();
    let count = |choice| choices.iter().filter(|c| **c == choice).count();
    assert_eq!(count(PatrolChoice::Idle), 40);
    assert_eq!(count(PatrolChoice::MoveRight), 30);
    assert_eq!(count(PatrolChoice::MoveLeft), 30);
}

#[test]
fn test_brain_starts_in_patrol() {
    let brain = EnemyBrain::new(brain_intervals());
    assert_eq!(brain.mode(), EnemyMode::Patrol);
    assert!(brain.timers().is_active(EnemyTimer::Patrol));
    assert!(!brain.is_running());
}

#[test]
fn test_detection_switches_to_alert_and_stops_patrol() {
    let mut brain = EnemyBrain::new(brain_intervals());
    brain.on_player_detected();

    assert_eq!(brain.mode(), EnemyMode::Alert);
    assert!(!brain.timers().is_active(EnemyTimer::Patrol));
    assert!(brain.timers().is_active(EnemyTimer::Alert));
    assert!(brain.timers().is_active(EnemyTimer::TrackPlayer));

    // Detecting again while alerted changes nothing
    brain.on_player_detected();
    assert_eq!(brain.timers().active_count(), 2);
}

#[test]
fn test_patrol_roll_moves_and_idles() {
    let mut brain = EnemyBrain::new(brain_intervals());
    let mut facing = Facing::Right;

    brain.tick(1.0, &mut facing, 0.0, None, || 10);
    assert_eq!(facing, Facing::Left);
    assert!(brain.is_running());

    brain.tick(1.0, &mut facing, 0.0, None, || 80);
    assert!(!brain.is_running());
}

#[test]
fn test_alert_runs_and_tracks_player() {
    let mut brain = EnemyBrain::new(brain_intervals());
    brain.on_player_detected();
    let mut facing = Facing::Right;

    // First alert tick starts running and turns toward the player on the left
    let steps = brain.tick(0.5, &mut facing, 100.0, Some(20.0), || 0);
    assert_eq!(steps, 0);
    assert_eq!(facing, Facing::Left);
    assert!(brain.is_running());

    let steps = brain.tick(0.5, &mut facing, 100.0, Some(200.0), || 0);
    assert_eq!(steps, 4);
    assert_eq!(facing, Facing::Right);
}

#[test]
fn test_repeated_mode_switches_keep_single_timers() {
    let mut brain = EnemyBrain::new(brain_intervals());
    let mut facing = Facing::Right;
    brain.on_player_detected();
    brain.tick(0.5, &mut facing, 0.0, None, || 0);

    for _ in 0..10 {
        brain.switch_mode(EnemyMode::Patrol);
        brain.switch_mode(EnemyMode::Alert);
    }

    // Alert, TrackPlayer, and the shared run step
    assert_eq!(brain.timers().active_count(), 3);
    assert_eq!(brain.tick(0.5, &mut facing, 0.0, None, || 0), 4);

    brain.switch_mode(EnemyMode::Patrol);
    assert!(!brain.timers().is_active(EnemyTimer::Alert));
    assert!(!brain.timers().is_active(EnemyTimer::TrackPlayer));
    assert!(brain.timers().is_active(EnemyTimer::Patrol));
}

// -----------------------------------------------------------------------------
// Emitter tests
// -----------------------------------------------------------------------------

fn style(kind: StyleKind, bullets: u32, volleys: u32) -> SpellCardStyle {
    SpellCardStyle {
        kind,
        interval: 0.5,
        volleys,
        bullets_per_volley: bullets,
        spread_degrees: 60.0,
        spacing: 10.0,
        bullet: BulletDef {
            damage: 10,
            speed: 200.0,
            flight_time: 2.0,
            size: 8.0,
        },
        team: Team::Enemy,
    }
}

#[test]
fn test_parallel_volley_lanes() {
    let shots = volley(&style(StyleKind::Parallel, 3, 1), Vec2::X, 0);
    assert_eq!(shots.len(), 3);
    assert!(shots.iter().all(|s| s.direction == Vec2::X));
    let lanes: Vec<f32> = shots.iter().map(|s| s.offset.y).collect();
    assert_eq!(lanes, vec![-10.0, 0.0, 10.0]);
}

#[test]
fn test_scatter_volley_spans_spread() {
    let shots = volley(&style(StyleKind::Scatter, 5, 1), Vec2::X, 0);
    assert_eq!(shots.len(), 5);
    let first = shots[0].direction.to_angle().to_degrees();
    let last = shots[4].direction.to_angle().to_degrees();
    assert!((first + 30.0).abs() < 1e-3);
    assert!((last - 30.0).abs() < 1e-3);
}

#[test]
fn test_odd_even_alternates_count() {
    let s = style(StyleKind::OddEven, 3, 4);
    assert_eq!(volley(&s, Vec2::X, 0).len(), 3);
    assert_eq!(volley(&s, Vec2::X, 1).len(), 4);
    assert_eq!(volley(&s, Vec2::X, 2).len(), 3);
}

#[test]
fn test_emitter_finishes_after_volley_count() {
    let mut emitter = Emitter::new(style(StyleKind::Parallel, 3, 3), Aim::ActivePlayer);
    assert_eq!(Emitter::duration(&emitter.style), Some(1.5));

    assert_eq!(emitter.tick(1.0), vec![0, 1]);
    assert!(!emitter.is_finished());
    assert_eq!(emitter.tick(10.0), vec![2]);
    assert!(emitter.is_finished());
    assert!(emitter.tick(1.0).is_empty());
}

#[test]
fn test_endless_emitter_never_finishes() {
    let mut emitter = Emitter::new(style(StyleKind::Scatter, 2, 0), Aim::ActivePlayer);
    assert_eq!(Emitter::duration(&emitter.style), None);
    assert_eq!(emitter.tick(5.0).len(), 10);
    assert!(!emitter.is_finished());
}
