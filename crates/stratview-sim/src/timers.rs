//! Tick-based timer queue for timed-action holds.
//!
//! Timers are keyed by run and sequence number. The queue itself never
//! decides whether a firing is still wanted: the engine compares each fired
//! key with the hold it is currently waiting on and drops the rest.

use serde::{Deserialize, Serialize};

/// Identity of one scheduled hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerKey {
    /// Run that scheduled the timer.
    pub run_id: u64,
    /// Position of the timer within that run.
    pub seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    key: TimerKey,
    due_tick: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: TimerKey, due_tick: u64) {
        self.pending.push(Scheduled { key, due_tick });
    }

    /// Remove and return every timer due at or before `now_tick`, earliest first.
    pub fn pop_due(&mut self, now_tick: u64) -> Vec<TimerKey> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|timer| {
            if timer.due_tick <= now_tick {
                due.push(*timer);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|timer| (timer.due_tick, timer.key.run_id, timer.key.seq));
        due.into_iter().map(|timer| timer.key).collect()
    }

    /// Tick at which `key` is due, if still pending.
    pub fn due_tick(&self, key: TimerKey) -> Option<u64> {
        self.pending
            .iter()
            .find(|timer| timer.key == key)
            .map(|timer| timer.due_tick)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(run_id: u64, seq: u64) -> TimerKey {
        TimerKey { run_id, seq }
    }

    #[test]
    fn test_pop_due_in_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(key(1, 2), 30);
        timers.schedule(key(1, 1), 10);
        timers.schedule(key(2, 0), 90);

        assert!(timers.pop_due(5).is_empty());
        assert_eq!(timers.pop_due(30), vec![key(1, 1), key(1, 2)]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.due_tick(key(2, 0)), Some(90));
        assert_eq!(timers.pop_due(1000), vec![key(2, 0)]);
        assert!(timers.is_empty());
    }
}
