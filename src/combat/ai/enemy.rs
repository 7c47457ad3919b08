//! Combat domain: enemy patrol/alert behavior.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::Enemy;
use crate::core::{AiRng, Cadence, Schedules};
use crate::movement::Facing;
use crate::player::Party;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum EnemyMode {
    Patrol,
    Alert,
}

/// Named periodic behaviors of one enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTimer {
    /// Re-roll the patrol choice
    Patrol,
    /// Keep running while alerted
    Alert,
    /// Turn toward the player
    TrackPlayer,
    /// Horizontal run step, shared by both modes
    Run,
}

/// Static description of a mode: the timers it owns.
#[derive(Debug)]
pub struct ModeDescriptor {
    pub mode: EnemyMode,
    pub timers: &'static [EnemyTimer],
}

static PATROL: ModeDescriptor = ModeDescriptor {
    mode: EnemyMode::Patrol,
    timers: &[EnemyTimer::Patrol],
};

static ALERT: ModeDescriptor = ModeDescriptor {
    mode: EnemyMode::Alert,
    timers: &[EnemyTimer::Alert, EnemyTimer::TrackPlayer],
};

pub fn mode_descriptor(mode: EnemyMode) -> &'static ModeDescriptor {
    match mode {
        EnemyMode::Patrol => &PATROL,
        EnemyMode::Alert => &ALERT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolChoice {
    Idle,
    MoveLeft,
    MoveRight,
}

/// Map a roll in `0..100` to a patrol choice: 40% idle, 30% right, 30% left.
pub fn roll_patrol(weight: u32) -> PatrolChoice {
    if weight >= 60 {
        PatrolChoice::Idle
    } else if weight >= 30 {
        PatrolChoice::MoveRight
    } else {
        PatrolChoice::MoveLeft
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyIntervals {
    pub patrol: f32,
    pub alert: f32,
    pub run: f32,
}

impl Default for EnemyIntervals {
    fn default() -> Self {
        Self {
            patrol: 1.0,
            alert: 0.5,
            run: 0.1,
        }
    }
}

/// Per-enemy state machine. Exactly one mode is current, and only its timers (plus the
/// shared run step) are scheduled.
#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    mode: EnemyMode,
    timers: Schedules<EnemyTimer>,
    intervals: EnemyIntervals,
}

impl EnemyBrain {
    pub fn new(intervals: EnemyIntervals) -> Self {
        let mut brain = Self {
            mode: EnemyMode::Patrol,
            timers: Schedules::default(),
            intervals,
        };
        brain.schedule_mode();
        brain
    }

    pub fn mode(&self) -> EnemyMode {
        self.mode
    }

    pub fn timers(&self) -> &Schedules<EnemyTimer> {
        &self.timers
    }

    pub fn is_running(&self) -> bool {
        self.timers.is_active(EnemyTimer::Run)
    }

    /// Unschedule every timer of the current mode, then schedule the new mode's timers.
    pub fn switch_mode(&mut self, mode: EnemyMode) {
        self.timers.stop_all(mode_descriptor(self.mode).timers);
        self.mode = mode;
        self.schedule_mode();
    }

    /// Player entered the detection box.
    pub fn on_player_detected(&mut self) {
        if self.mode == EnemyMode::Patrol {
            self.switch_mode(EnemyMode::Alert);
        }
    }

    fn schedule_mode(&mut self) {
        for &timer in mode_descriptor(self.mode).timers {
            let interval = match timer {
                EnemyTimer::Patrol => self.intervals.patrol,
                EnemyTimer::Alert | EnemyTimer::TrackPlayer => self.intervals.alert,
                EnemyTimer::Run => self.intervals.run,
            };
            self.timers.start(timer, Cadence::every(interval));
        }
    }

    fn start_running(&mut self) {
        self.timers
            .start(EnemyTimer::Run, Cadence::every(self.intervals.run));
    }

    /// Advance timers by `dt`. Returns how many run steps are due.
    pub fn tick(
        &mut self,
        dt: f32,
        facing: &mut Facing,
        self_x: f32,
        player_x: Option<f32>,
        mut roll: impl FnMut() -> u32,
    ) -> u32 {
        let mut run_steps = 0;
        for (timer, count) in self.timers.tick(dt) {
            match timer {
                EnemyTimer::Patrol => {
                    for _ in 0..count {
                        match roll_patrol(roll()) {
                            PatrolChoice::Idle => {
                                self.timers.stop(EnemyTimer::Run);
                            }
                            PatrolChoice::MoveLeft => {
                                *facing = Facing::Left;
                                self.start_running();
                            }
                            PatrolChoice::MoveRight => {
                                *facing = Facing::Right;
                                self.start_running();
                            }
                        }
                    }
                }
                EnemyTimer::Alert => self.start_running(),
                EnemyTimer::TrackPlayer => {
                    if let Some(player_x) = player_x {
                        *facing = Facing::toward(self_x, player_x);
                    }
                }
                EnemyTimer::Run => run_steps += count,
            }
        }
        run_steps
    }
}

/// Tick every enemy brain and turn due run steps into horizontal velocity.
pub(crate) fn update_enemy_brains(
    time: Res<Time>,
    party: Res<Party>,
    mut rng: ResMut<AiRng>,
    players: Query<&Transform, Without<Enemy>>,
    mut enemies: Query<(
        &Enemy,
        &mut EnemyBrain,
        &mut Facing,
        &Transform,
        &mut LinearVelocity,
    )>,
) {
    let dt = time.delta_secs();
    let player_x = party
        .active()
        .and_then(|player| players.get(player).ok())
        .map(|transform| transform.translation.x);

    for (enemy, mut brain, mut facing, transform, mut velocity) in &mut enemies {
        let steps = brain.tick(
            dt,
            &mut facing,
            transform.translation.x,
            player_x,
            || rng.0.random_range(0..100),
        );
        if steps > 0 {
            velocity.x += enemy.run_impulse * facing.sign() * steps as f32;
        }
    }
}
