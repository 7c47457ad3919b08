//! Combat domain: bullet pattern emitters for launchers and spell cards.

use bevy::prelude::*;

use crate::combat::CombatTuning;
use crate::combat::spawn::spawn_bullet;
use crate::content::{SpellCardStyle, StyleKind};
use crate::core::{Cadence, Schedules};
use crate::movement::Facing;
use crate::player::Party;

/// One bullet of a volley: where it starts relative to the emitter and where it heads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub offset: Vec2,
    pub direction: Vec2,
}

/// Bullets of volley number `volley` aimed along `aim`.
pub fn volley(style: &SpellCardStyle, aim: Vec2, volley: u32) -> Vec<Shot> {
    let aim = aim.try_normalize().unwrap_or(Vec2::X);
    let count = match style.kind {
        StyleKind::OddEven if volley % 2 == 1 => style.bullets_per_volley + 1,
        _ => style.bullets_per_volley,
    };
    if count == 0 {
        return Vec::new();
    }

    match style.kind {
        StyleKind::Parallel => {
            let across = aim.perp();
            let first = -(count as f32 - 1.0) * 0.5;
            (0..count)
                .map(|i| Shot {
                    offset: across * (first + i as f32) * style.spacing,
                    direction: aim,
                })
                .collect()
        }
        StyleKind::Scatter | StyleKind::OddEven => fan(aim, count, style.spread_degrees),
    }
}

fn fan(aim: Vec2, count: u32, spread_degrees: f32) -> Vec<Shot> {
    if count == 1 {
        return vec![Shot {
            offset: Vec2::ZERO,
            direction: aim,
        }];
    }
    let spread = spread_degrees.to_radians();
    let step = spread / (count as f32 - 1.0);
    (0..count)
        .map(|i| {
            let angle = -spread * 0.5 + step * i as f32;
            Shot {
                offset: Vec2::ZERO,
                direction: Vec2::from_angle(angle).rotate(aim),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterTimer {
    Volley,
}

/// What an emitter aims at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aim {
    /// The active player character
    ActivePlayer,
    /// Straight ahead along the owner's facing
    OwnerFacing(Entity),
}

#[derive(Component, Debug, Clone)]
pub struct Emitter {
    pub style: SpellCardStyle,
    pub aim: Aim,
    fired: u32,
    timers: Schedules<EmitterTimer>,
}

impl Emitter {
    pub fn new(style: SpellCardStyle, aim: Aim) -> Self {
        let mut timers = Schedules::default();
        timers.start(EmitterTimer::Volley, Cadence::every(style.interval));
        Self {
            style,
            aim,
            fired: 0,
            timers,
        }
    }

    /// Seconds until the last volley, or `None` for endless patterns.
    pub fn duration(style: &SpellCardStyle) -> Option<f32> {
        (style.volleys > 0).then(|| style.interval.max(0.0) * style.volleys as f32)
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub fn is_finished(&self) -> bool {
        self.style.volleys > 0 && self.fired >= self.style.volleys
    }

    /// Advance time and return the indices of volleys that are due.
    pub fn tick(&mut self, dt: f32) -> Vec<u32> {
        let mut due = Vec::new();
        for (_, count) in self.timers.tick(dt) {
            for _ in 0..count {
                if self.is_finished() {
                    break;
                }
                due.push(self.fired);
                self.fired += 1;
            }
        }
        due
    }
}

pub(crate) fn run_emitters(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    party: Res<Party>,
    targets: Query<(&GlobalTransform, Option<&Facing>)>,
    mut emitters: Query<(Entity, &mut Emitter, &GlobalTransform)>,
) {
    let dt = time.delta_secs();
    let player_pos = party
        .active()
        .and_then(|player| targets.get(player).ok())
        .map(|(transform, _)| transform.translation().truncate());

    for (entity, mut emitter, transform) in &mut emitters {
        let origin = transform.translation().truncate();
        let aim = match emitter.aim {
            Aim::ActivePlayer => player_pos.map(|target| target - origin),
            Aim::OwnerFacing(owner) => targets
                .get(owner)
                .ok()
                .map(|(_, facing)| Vec2::X * facing.copied().unwrap_or_default().sign()),
        };

        for index in emitter.tick(dt) {
            let Some(aim) = aim else {
                continue;
            };
            for shot in volley(&emitter.style, aim, index) {
                let start = origin + shot.offset + shot.direction * tuning.muzzle_offset;
                spawn_bullet(
                    &mut commands,
                    start,
                    shot.direction * emitter.style.bullet.speed,
                    &emitter.style.bullet,
                    emitter.style.team,
                );
            }
        }

        if emitter.is_finished() {
            debug!("Emitter {:?} finished after {} volleys", entity, emitter.fired());
            commands.entity(entity).despawn();
        }
    }
}
