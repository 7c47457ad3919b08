//! Core domain: the synchronous gameplay event bus.
//!
//! Subscribers run immediately inside [`publish`], in registration order, with exclusive
//! access to the [`World`]. A handler may publish other events while it runs; it must not
//! republish its own kind.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

/// Damage aimed at one entity, carried by the hit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageInfo {
    pub damage: i32,
    pub target: Entity,
}

/// Signed change to one of the target's combat meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceChange {
    pub target: Entity,
    pub amount: i32,
}

/// Dispatch key of a [`GameEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    LeftKeyPressed,
    RightKeyPressed,
    MotionKeyReleased,
    JumpKeyPressed,
    DashKeyPressed,
    SwitchCharacter,
    SwitchAttackType,
    UseItem,
    UseSpellCard,
    SettingsKeyPressed,
    BulletHitEnemy,
    BulletHitPlayer,
    HpChange,
    ManaChange,
    TriggerEvent,
    KillBoss,
    AreaChanged,
}

impl EventKind {
    /// Wire name shared with the input and UI layers.
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::LeftKeyPressed => "left_key_pressed",
            EventKind::RightKeyPressed => "right_key_pressed",
            EventKind::MotionKeyReleased => "motion_key_released",
            EventKind::JumpKeyPressed => "jump_key_pressed",
            EventKind::DashKeyPressed => "dash_key_pressed",
            EventKind::SwitchCharacter => "switch_character",
            EventKind::SwitchAttackType => "switch_attack_type",
            EventKind::UseItem => "use_item",
            EventKind::UseSpellCard => "use_spell_card",
            EventKind::SettingsKeyPressed => "settings_key_pressed",
            EventKind::BulletHitEnemy => "bullet_hit_enemy",
            EventKind::BulletHitPlayer => "bullet_hit_player",
            EventKind::HpChange => "hp_change",
            EventKind::ManaChange => "mana_change",
            EventKind::TriggerEvent => "trigger_event",
            EventKind::KillBoss => "kill_boss",
            EventKind::AreaChanged => "area_changed",
        }
    }
}

/// Every payload that travels over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LeftKeyPressed,
    RightKeyPressed,
    MotionKeyReleased,
    JumpKeyPressed,
    DashKeyPressed,
    SwitchCharacter,
    SwitchAttackType,
    UseItem { item_id: String },
    UseSpellCard { card_id: String },
    SettingsKeyPressed,
    BulletHitEnemy(DamageInfo),
    BulletHitPlayer(DamageInfo),
    HpChange(ResourceChange),
    ManaChange(ResourceChange),
    TriggerEvent { event_id: String },
    KillBoss { boss: Entity },
    AreaChanged { area: usize },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::LeftKeyPressed => EventKind::LeftKeyPressed,
            GameEvent::RightKeyPressed => EventKind::RightKeyPressed,
            GameEvent::MotionKeyReleased => EventKind::MotionKeyReleased,
            GameEvent::JumpKeyPressed => EventKind::JumpKeyPressed,
            GameEvent::DashKeyPressed => EventKind::DashKeyPressed,
            GameEvent::SwitchCharacter => EventKind::SwitchCharacter,
            GameEvent::SwitchAttackType => EventKind::SwitchAttackType,
            GameEvent::UseItem { .. } => EventKind::UseItem,
            GameEvent::UseSpellCard { .. } => EventKind::UseSpellCard,
            GameEvent::SettingsKeyPressed => EventKind::SettingsKeyPressed,
            GameEvent::BulletHitEnemy(_) => EventKind::BulletHitEnemy,
            GameEvent::BulletHitPlayer(_) => EventKind::BulletHitPlayer,
            GameEvent::HpChange(_) => EventKind::HpChange,
            GameEvent::ManaChange(_) => EventKind::ManaChange,
            GameEvent::TriggerEvent { .. } => EventKind::TriggerEvent,
            GameEvent::KillBoss { .. } => EventKind::KillBoss,
            GameEvent::AreaChanged { .. } => EventKind::AreaChanged,
        }
    }
}

pub type Handler = Arc<dyn Fn(&mut World, &GameEvent) + Send + Sync>;

/// Subscriber table, one ordered list per event kind.
#[derive(Resource, Default)]
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<Handler>>,
}

impl EventBus {
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&mut World, &GameEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Arc::new(handler));
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    fn handlers(&self, kind: EventKind) -> Vec<Handler> {
        self.subscribers.get(&kind).cloned().unwrap_or_default()
    }
}

/// Fan `event` out to every subscriber of its kind before returning.
pub fn publish(world: &mut World, event: GameEvent) {
    let Some(bus) = world.get_resource::<EventBus>() else {
        warn!("No EventBus in world, dropping '{}'", event.kind().name());
        return;
    };
    // Snapshot so handlers may subscribe or publish while we iterate
    let handlers = bus.handlers(event.kind());

    trace!(
        "bus: '{}' -> {} subscriber(s)",
        event.kind().name(),
        handlers.len()
    );

    for handler in &handlers {
        handler(world, &event);
    }
}

/// Publishing from regular systems. The dispatch runs when the command queue is applied,
/// still inside the current frame.
pub trait PublishExt {
    fn publish(&mut self, event: GameEvent);
}

impl PublishExt for Commands<'_, '_> {
    fn publish(&mut self, event: GameEvent) {
        self.queue(move |world: &mut World| publish(world, event));
    }
}

/// Subscription during plugin build.
pub trait BusAppExt {
    fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: Fn(&mut World, &GameEvent) + Send + Sync + 'static;
}

impl BusAppExt for App {
    fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: Fn(&mut World, &GameEvent) + Send + Sync + 'static,
    {
        self.init_resource::<EventBus>();
        self.world_mut()
            .resource_mut::<EventBus>()
            .subscribe(kind, handler);
        self
    }
}
