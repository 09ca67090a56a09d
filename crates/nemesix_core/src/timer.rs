//! Virtual-clock timers (`setTimeout` / `setInterval`)
//!
//! Timers are ordered by due time, then by scheduling order. The queue never
//! invokes callbacks itself: [`TimerQueue::pop_due`] hands the next due
//! callback to the caller, so the window can release its borrow before
//! running it.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Handle to a scheduled timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A callback ready to run
pub enum DueTimer {
    Once(Box<dyn FnOnce()>),
    Repeat(Rc<dyn Fn()>),
}

impl DueTimer {
    pub fn invoke(self) {
        match self {
            DueTimer::Once(callback) => callback(),
            DueTimer::Repeat(callback) => callback(),
        }
    }
}

enum TimerCallback {
    Once(Box<dyn FnOnce()>),
    Repeat { callback: Rc<dyn Fn()>, period_ms: u64 },
}

struct Timer {
    due_ms: u64,
    seq: u64,
    callback: TimerCallback,
}

/// Pending timers keyed by `(due, seq)`
#[derive(Default)]
pub struct TimerQueue {
    order: BTreeMap<(u64, u64), TimerId>,
    timers: FxHashMap<TimerId, Timer>,
    next_id: u64,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn insert(&mut self, due_ms: u64, callback: TimerCallback) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq();
        self.order.insert((due_ms, seq), id);
        self.timers.insert(
            id,
            Timer {
                due_ms,
                seq,
                callback,
            },
        );
        id
    }

    /// Schedule a one-shot callback at `now + delay`
    pub fn set_timeout(&mut self, now_ms: u64, delay_ms: u64, callback: Box<dyn FnOnce()>) -> TimerId {
        self.insert(now_ms + delay_ms, TimerCallback::Once(callback))
    }

    /// Schedule a repeating callback every `period` (at least 1ms)
    pub fn set_interval(&mut self, now_ms: u64, period_ms: u64, callback: Rc<dyn Fn()>) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(now_ms + period_ms, TimerCallback::Repeat { callback, period_ms })
    }

    /// Cancel a timer; returns false if it already fired or was cleared
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                self.order.remove(&(timer.due_ms, timer.seq));
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Due time of the earliest timer
    pub fn next_due(&self) -> Option<u64> {
        self.order.keys().next().map(|(due, _)| *due)
    }

    /// Take the earliest timer due at or before `until`
    ///
    /// Intervals are rescheduled one period after their due time before
    /// being returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, DueTimer)> {
        let (&(due_ms, seq), &id) = self.order.iter().next()?;
        if due_ms > until_ms {
            return None;
        }
        self.order.remove(&(due_ms, seq));
        let timer = self.timers.remove(&id)?;

        match timer.callback {
            TimerCallback::Once(callback) => Some((due_ms, DueTimer::Once(callback))),
            TimerCallback::Repeat { callback, period_ms } => {
                let next_due = due_ms + period_ms;
                let next_seq = self.next_seq();
                self.order.insert((next_due, next_seq), id);
                self.timers.insert(
                    id,
                    Timer {
                        due_ms: next_due,
                        seq: next_seq,
                        callback: TimerCallback::Repeat {
                            callback: Rc::clone(&callback),
                            period_ms,
                        },
                    },
                );
                Some((due_ms, DueTimer::Repeat(callback)))
            }
        }
    }
}
