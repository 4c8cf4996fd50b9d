//! One-shot deadline timers driven by an external event loop.

use std::time::{Duration, Instant};

/// Opaque handle for a scheduled callback. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Deadline bookkeeping for one-shot timers.
///
/// The owner sleeps until [`DeadlineTimers::next_deadline`] and then delivers
/// whatever [`DeadlineTimers::take_due`] returns.
#[derive(Debug, Default)]
pub struct DeadlineTimers {
    next_id: u64,
    pending: Vec<(TimerToken, Instant)>,
}

impl DeadlineTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending.push((token, now + delay));
        token
    }

    /// Returns `false` if the token already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(t, _)| *t != token);
        self.pending.len() != before
    }

    /// Remove and return every token whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerToken> {
        let mut due: Vec<(TimerToken, Instant)> = Vec::new();
        self.pending.retain(|&(token, at)| {
            if at <= now {
                due.push((token, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, at)| at);
        due.into_iter().map(|(token, _)| token).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|&(_, at)| at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
