//! One-shot feedback clear timers
//!
//! The event loop sleeps until the nearest deadline and then feeds the due generations
//! back into the engine as clear events.

use std::time::Instant;

#[derive(Debug, Default)]
pub struct FeedbackTimers {
    /// (deadline, feedback generation)
    pending: Vec<(Instant, u64)>,
}

impl FeedbackTimers {
    pub fn schedule(&mut self, generation: u64, deadline: Instant) {
        self.pending.push((deadline, generation));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return the generations whose deadline is at or before `now`, oldest first
    pub fn take_due(&mut self, now: Instant) -> Vec<u64> {
        let mut due: Vec<(Instant, u64)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, generation)| generation).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
