//! Areas domain: live-boss bookkeeping for the current region.

use bevy::prelude::*;

use crate::areas::AreaTuning;
use crate::core::{GameEvent, PublishExt};

/// Counts the region's living bosses and delays the clear event after the last one falls.
#[derive(Resource, Debug, Default)]
pub struct BossTracker {
    live: u32,
    clear_in: Option<f32>,
}

impl BossTracker {
    pub fn live(&self) -> u32 {
        self.live
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_in.is_some()
    }

    /// New region: forget everything about the previous one.
    pub fn reset(&mut self, live: u32) {
        self.live = live;
        self.clear_in = None;
    }

    pub fn on_boss_killed(&mut self, delay: f32) {
        if self.live == 0 {
            return;
        }
        self.live -= 1;
        if self.live == 0 {
            self.clear_in = Some(delay);
        }
    }

    /// Returns true on the tick the clear delay runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.clear_in.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }
        self.clear_in = None;
        true
    }
}

/// `kill_boss`
pub(crate) fn on_kill_boss(world: &mut World, event: &GameEvent) {
    let GameEvent::KillBoss { boss } = event else {
        return;
    };
    let delay = world
        .get_resource::<AreaTuning>()
        .map_or(3.0, |t| t.boss_clear_delay);
    let Some(mut tracker) = world.get_resource_mut::<BossTracker>() else {
        return;
    };
    tracker.on_boss_killed(delay);
    info!("Boss {:?} defeated, {} left", boss, tracker.live());
}

pub(crate) fn tick_boss_tracker(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<AreaTuning>,
    mut tracker: ResMut<BossTracker>,
) {
    if !tracker.is_clear_pending() || !tracker.tick(time.delta_secs()) {
        return;
    }
    info!("Region cleared");
    commands.publish(GameEvent::TriggerEvent {
        event_id: tuning.clear_event.clone(),
    });
}

/// `trigger_event`: story events are consumed by the UI layer; the simulation only logs them.
pub(crate) fn on_trigger_event(_world: &mut World, event: &GameEvent) {
    if let GameEvent::TriggerEvent { event_id } = event {
        info!("Story event '{}'", event_id);
    }
}
