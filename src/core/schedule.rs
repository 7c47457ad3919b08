//! Core domain: named periodic behaviors owned by a single entity.
//!
//! A behavior is identified by its key; starting an active key never creates a second
//! instance, and stopping a key removes exactly that behavior.

/// How often a scheduled behavior fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    /// Once per simulation tick
    EveryTick,
    /// Fixed interval in seconds
    Every(f32),
}

impl Cadence {
    /// Non-positive intervals degrade to once per tick.
    pub fn every(seconds: f32) -> Self {
        if seconds > 0.0 {
            Cadence::Every(seconds)
        } else {
            Cadence::EveryTick
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<K> {
    key: K,
    cadence: Cadence,
    elapsed: f32,
}

/// Ordered set of named timers. Firing order is registration order.
#[derive(Debug, Clone)]
pub struct Schedules<K> {
    slots: Vec<Slot<K>>,
}

impl<K> Default for Schedules<K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: Copy + PartialEq> Schedules<K> {
    /// Start `key`, returning false when it was already running. A running key keeps its
    /// accumulated time and only takes the new cadence.
    pub fn start(&mut self, key: K, cadence: Cadence) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.key == key) {
            slot.cadence = cadence;
            return false;
        }
        self.slots.push(Slot {
            key,
            cadence,
            elapsed: 0.0,
        });
        true
    }

    pub fn stop(&mut self, key: K) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.key != key);
        before != self.slots.len()
    }

    pub fn stop_all(&mut self, keys: &[K]) {
        self.slots.retain(|s| !keys.contains(&s.key));
    }

    pub fn is_active(&self, key: K) -> bool {
        self.slots.iter().any(|s| s.key == key)
    }

    pub fn cadence(&self, key: K) -> Option<Cadence> {
        self.slots.iter().find(|s| s.key == key).map(|s| s.cadence)
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    /// Advance every timer by `dt` seconds and report how many times each one fired.
    pub fn tick(&mut self, dt: f32) -> Vec<(K, u32)> {
        let mut fired = Vec::new();
        for slot in &mut self.slots {
            match slot.cadence {
                Cadence::EveryTick => fired.push((slot.key, 1)),
                Cadence::Every(interval) => {
                    slot.elapsed += dt;
                    let count = (slot.elapsed / interval).floor();
                    if count >= 1.0 {
                        slot.elapsed -= count * interval;
                        fired.push((slot.key, count as u32));
                    }
                }
            }
        }
        fired
    }
}
