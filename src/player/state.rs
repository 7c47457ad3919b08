//! Player domain: the action state machine of one playable character.
//!
//! Every method is a pure function of the machine, the current velocity, and tuning. It
//! returns the velocity to write back to the body, or `None` when the action is refused.

use bevy::prelude::*;

use crate::content::{AttackTypeDef, BulletDef};
use crate::core::{Cadence, Schedules};
use crate::movement::{Facing, MovementTuning, dash_velocity, jump_velocity, release_step, run_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ActionState {
    Stand,
    Walk,
    Jump,
    Dash,
    UseSpellCard,
    Hit,
}

/// Animation the sprite layer should be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimationKey {
    Stand,
    Run,
    Jump,
    Dash,
    Hit,
}

/// Named periodic behaviors of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTimer {
    /// Horizontal acceleration while a direction is held
    RunAccel,
    /// Periodic shot of the active attack type
    Fire,
    DashRegen,
    JumpRegen,
    /// One-shot animation finished
    AnimationRevert,
    HitRecover,
    /// Spell card emission finished
    SpellCard,
}

/// Static rules of one state.
#[derive(Debug)]
pub struct StateDescriptor {
    pub state: ActionState,
    pub can_jump: bool,
    pub can_dash: bool,
    pub animation: AnimationKey,
    /// Timers owned by the state, stopped when it is left
    pub timers: &'static [PlayerTimer],
}

static STAND: StateDescriptor = StateDescriptor {
    state: ActionState::Stand,
    can_jump: true,
    can_dash: true,
    animation: AnimationKey::Stand,
    timers: &[],
};

static WALK: StateDescriptor = StateDescriptor {
    state: ActionState::Walk,
    can_jump: true,
    can_dash: true,
    animation: AnimationKey::Run,
    timers: &[],
};

static JUMP: StateDescriptor = StateDescriptor {
    state: ActionState::Jump,
    can_jump: true,
    can_dash: true,
    animation: AnimationKey::Jump,
    timers: &[],
};

static DASH: StateDescriptor = StateDescriptor {
    state: ActionState::Dash,
    can_jump: true,
    can_dash: true,
    animation: AnimationKey::Dash,
    timers: &[],
};

static USE_SPELL_CARD: StateDescriptor = StateDescriptor {
    state: ActionState::UseSpellCard,
    can_jump: false,
    can_dash: false,
    animation: AnimationKey::Stand,
    timers: &[PlayerTimer::SpellCard],
};

static HIT: StateDescriptor = StateDescriptor {
    state: ActionState::Hit,
    can_jump: true,
    can_dash: true,
    animation: AnimationKey::Hit,
    timers: &[PlayerTimer::HitRecover],
};

pub fn state_descriptor(state: ActionState) -> &'static StateDescriptor {
    match state {
        ActionState::Stand => &STAND,
        ActionState::Walk => &WALK,
        ActionState::Jump => &JUMP,
        ActionState::Dash => &DASH,
        ActionState::UseSpellCard => &USE_SPELL_CARD,
        ActionState::Hit => &HIT,
    }
}

/// Consumable action counter that regenerates one charge at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charges {
    pub current: u32,
    pub max: u32,
}

impl Charges {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn take(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn grant(&mut self, count: u32) {
        self.current = self.current.saturating_add(count).min(self.max);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// One configured attack type.
#[derive(Debug, Clone)]
pub struct AttackSlot {
    pub id: String,
    pub fire_interval: Option<f32>,
    pub bullet: BulletDef,
}

impl From<&AttackTypeDef> for AttackSlot {
    fn from(def: &AttackTypeDef) -> Self {
        Self {
            id: def.id.clone(),
            fire_interval: def.fire_interval,
            bullet: def.bullet.clone(),
        }
    }
}

/// What a tick asks the body to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionTick {
    pub velocity: Vec2,
    pub shots: u32,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerActions {
    state: ActionState,
    facing: Facing,
    airborne: bool,
    animation: AnimationKey,
    jump: Charges,
    dash: Charges,
    attacks: Vec<AttackSlot>,
    active_attack: usize,
    timers: Schedules<PlayerTimer>,
}

impl PlayerActions {
    pub fn new(attacks: Vec<AttackSlot>, tuning: &MovementTuning) -> Self {
        let mut timers = Schedules::default();
        timers.start(
            PlayerTimer::DashRegen,
            Cadence::every(tuning.dash_regen_interval),
        );
        timers.start(
            PlayerTimer::JumpRegen,
            Cadence::every(tuning.jump_regen_interval),
        );
        Self {
            state: ActionState::Stand,
            facing: Facing::Right,
            airborne: false,
            animation: AnimationKey::Stand,
            jump: Charges::full(tuning.max_jump_charges),
            dash: Charges::full(tuning.max_dash_charges),
            attacks,
            active_attack: 0,
            timers,
        }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn animation(&self) -> AnimationKey {
        self.animation
    }

    pub fn jump_charges(&self) -> Charges {
        self.jump
    }

    pub fn dash_charges(&self) -> Charges {
        self.dash
    }

    pub fn timers(&self) -> &Schedules<PlayerTimer> {
        &self.timers
    }

    pub fn active_attack(&self) -> Option<&AttackSlot> {
        self.attacks.get(self.active_attack)
    }

    /// Leave the current state, cancelling every timer it owns.
    fn transition(&mut self, next: ActionState) {
        if self.state == next {
            return;
        }
        self.timers.stop_all(state_descriptor(self.state).timers);
        trace!("player action {:?} -> {:?}", self.state, next);
        self.state = next;
        if !self.timers.is_active(PlayerTimer::AnimationRevert) {
            self.animation = self.resting_animation();
        }
    }

    /// Looping animation for the current state. Airborne states only play their
    /// one-shot, then fall back to running or idling.
    fn resting_animation(&self) -> AnimationKey {
        match self.state {
            ActionState::Jump | ActionState::Dash
                if self.timers.is_active(PlayerTimer::RunAccel) =>
            {
                AnimationKey::Run
            }
            ActionState::Jump | ActionState::Dash => AnimationKey::Stand,
            state => state_descriptor(state).animation,
        }
    }

    /// State to return to once a timed action ends.
    fn settle(&mut self) {
        let next = if self.airborne {
            ActionState::Jump
        } else if self.timers.is_active(PlayerTimer::RunAccel) {
            ActionState::Walk
        } else {
            ActionState::Stand
        };
        self.transition(next);
    }

    fn play_once(&mut self, animation: AnimationKey, duration: f32) {
        self.animation = animation;
        self.timers.stop(PlayerTimer::AnimationRevert);
        self.timers
            .start(PlayerTimer::AnimationRevert, Cadence::every(duration));
    }

    /// Held direction: face it and accelerate every tick until released.
    pub fn press_direction(&mut self, facing: Facing) {
        self.facing = facing;
        self.timers.start(PlayerTimer::RunAccel, Cadence::EveryTick);
        if self.state == ActionState::Stand {
            self.transition(ActionState::Walk);
        }
    }

    /// Released direction: stop accelerating; walking damps horizontal speed at once.
    pub fn release_direction(&mut self, velocity: Vec2, tuning: &MovementTuning) -> Vec2 {
        self.timers.stop(PlayerTimer::RunAccel);
        if self.state != ActionState::Walk {
            return velocity;
        }
        self.transition(ActionState::Stand);
        Vec2::new(release_step(velocity.x, tuning), velocity.y)
    }

    pub fn try_jump(
        &mut self,
        velocity: Vec2,
        tuning: &MovementTuning,
        animation_time: f32,
    ) -> Option<Vec2> {
        if !state_descriptor(self.state).can_jump || !self.jump.take() {
            return None;
        }
        self.airborne = true;
        self.transition(ActionState::Jump);
        self.play_once(AnimationKey::Jump, animation_time);
        Some(jump_velocity(velocity, tuning))
    }

    pub fn try_dash(
        &mut self,
        velocity: Vec2,
        tuning: &MovementTuning,
        animation_time: f32,
    ) -> Option<Vec2> {
        if !state_descriptor(self.state).can_dash || !self.dash.take() {
            return None;
        }
        self.transition(ActionState::Dash);
        self.play_once(AnimationKey::Dash, animation_time);
        Some(dash_velocity(velocity, self.facing, tuning))
    }

    /// Landed on a surface from above.
    pub fn reset_jump(&mut self) {
        self.jump.refill();
        self.airborne = false;
        if self.state == ActionState::Jump {
            self.settle();
        }
    }

    pub fn can_cast(&self) -> bool {
        self.state != ActionState::UseSpellCard
    }

    /// Enter `UseSpellCard` until `duration` has passed.
    pub fn begin_spell_card(&mut self, duration: f32) -> bool {
        if !self.can_cast() {
            return false;
        }
        self.transition(ActionState::UseSpellCard);
        self.timers
            .start(PlayerTimer::SpellCard, Cadence::every(duration));
        true
    }

    /// Took damage. A spell card in progress is not interrupted.
    pub fn enter_hit(&mut self, recover_time: f32) -> bool {
        if self.state == ActionState::UseSpellCard {
            return false;
        }
        self.transition(ActionState::Hit);
        self.timers
            .start(PlayerTimer::HitRecover, Cadence::every(recover_time));
        true
    }

    /// Begin periodic firing of the active attack type.
    pub fn start_attack(&mut self) {
        self.timers.stop(PlayerTimer::Fire);
        if let Some(interval) = self.active_attack().and_then(|a| a.fire_interval) {
            self.timers.start(PlayerTimer::Fire, Cadence::every(interval));
        }
    }

    pub fn stop_attack(&mut self) {
        self.timers.stop(PlayerTimer::Fire);
    }

    /// Toggle between `type1` and `type2`, restarting firing at the new interval.
    pub fn switch_attack_type(&mut self) -> Option<&AttackSlot> {
        if self.attacks.len() < 2 {
            return None;
        }
        self.stop_attack();
        self.active_attack = (self.active_attack + 1) % 2;
        self.start_attack();
        self.active_attack()
    }

    /// Outgoing side of a character switch.
    pub fn bench(&mut self) {
        self.stop_attack();
        self.timers.stop(PlayerTimer::RunAccel);
        self.timers.stop(PlayerTimer::AnimationRevert);
        self.transition(ActionState::Stand);
        self.animation = AnimationKey::Stand;
    }

    /// Zero HP: stop firing and accelerating and drop whatever action was running.
    pub fn knock_out(&mut self) {
        self.bench();
        self.animation = AnimationKey::Hit;
    }

    /// Incoming side of a character switch.
    pub fn take_over(&mut self, facing: Facing) {
        self.facing = facing;
        self.start_attack();
    }

    /// Advance every timer by `dt` and apply what fired.
    pub fn tick(&mut self, dt: f32, velocity: Vec2, tuning: &MovementTuning) -> ActionTick {
        let mut velocity = velocity;
        let mut shots = 0;

        for (timer, count) in self.timers.tick(dt) {
            match timer {
                PlayerTimer::RunAccel => {
                    velocity.x = run_step(velocity.x, self.facing, tuning, dt);
                }
                PlayerTimer::Fire => shots += count,
                PlayerTimer::DashRegen => self.dash.grant(count),
                PlayerTimer::JumpRegen => self.jump.grant(count),
                PlayerTimer::AnimationRevert => {
                    self.timers.stop(PlayerTimer::AnimationRevert);
                    if self.state == ActionState::Dash {
                        self.settle();
                    }
                    self.animation = self.resting_animation();
                }
                PlayerTimer::HitRecover | PlayerTimer::SpellCard => self.settle(),
            }
        }

        ActionTick { velocity, shots }
    }
}
