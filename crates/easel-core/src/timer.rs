//! Periodic tasks driven by the event loop.
//!
//! A task is armed with an interval and identified by a [`TimerToken`].
//! The scheduler owns re-arming: after each tick the callback returns a
//! [`TimerControl`] and the loop either re-arms the token or drops it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Returned by timer callbacks to keep or stop the periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerControl {
    #[default]
    Continue,
    Stop,
}

/// Cancellation handle for one armed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Task<T> {
    payload: T,
    interval: Duration,
}

/// A min-heap of deadlines over cancellable tasks.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_token: u64,
    queue: BinaryHeap<Reverse<(Duration, TimerToken)>>,
    tasks: HashMap<TimerToken, Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_token: 1,
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task that first fires at `now + interval`.
    pub fn schedule(&mut self, now: Duration, interval: Duration, payload: T) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.tasks.insert(token, Task { payload, interval });
        self.queue.push(Reverse((now + interval, token)));
        token
    }

    /// Arm a live task again for `now + interval`.
    pub fn rearm(&mut self, token: TimerToken, now: Duration) -> bool {
        match self.tasks.get(&token) {
            Some(task) => {
                self.queue.push(Reverse((now + task.interval, token)));
                true
            }
            None => false,
        }
    }

    /// Drop a task. Pending deadlines for it are discarded lazily.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        self.tasks.remove(&token).is_some()
    }

    pub fn is_live(&self, token: TimerToken) -> bool {
        self.tasks.contains_key(&token)
    }

    /// Earliest deadline among live tasks.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.queue.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Pop one task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerToken, T)> {
        self.discard_cancelled();
        let Reverse((deadline, token)) = *self.queue.peek()?;
        if deadline > now {
            return None;
        }
        self.queue.pop();
        self.tasks.get(&token).map(|task| (token, task.payload.clone()))
    }

    /// Drop every task.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, token))) = self.queue.peek() {
            if self.tasks.contains_key(token) {
                break;
            }
            self.queue.pop();
        }
    }
}
