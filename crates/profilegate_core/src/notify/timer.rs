//! Deterministic single-threaded timer queue.

use crate::notify::EpochMs;
use std::collections::BTreeMap;

/// Handle to one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Timers keyed by id; firing order is deadline, then scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: BTreeMap<TimerId, (EpochMs, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: EpochMs, target: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, (deadline, target));
        id
    }

    /// Cancels a timer; returns `false` when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every timer whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: EpochMs) -> Vec<(TimerId, T)> {
        let mut due_ids = self
            .pending
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .map(|(id, (deadline, _))| (*deadline, *id))
            .collect::<Vec<_>>();
        due_ids.sort();

        due_ids
            .into_iter()
            .filter_map(|(_, id)| self.pending.remove(&id).map(|(_, target)| (id, target)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn fires_in_deadline_order_and_only_once() {
        let mut queue = TimerQueue::new();
        queue.schedule(300, "late");
        queue.schedule(100, "early");

        assert!(queue.take_due(50).is_empty());
        let fired = queue
            .take_due(300)
            .into_iter()
            .map(|(_, target)| target)
            .collect::<Vec<_>>();
        assert_eq!(fired, vec!["early", "late"]);
        assert!(queue.take_due(1_000).is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(10, ());
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.take_due(10).is_empty());
    }
}
