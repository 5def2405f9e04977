//! Fixed-TTL cache with manual invalidation
//!
//! Holds a single value and the instant it was stored. Callers pass `now`
//! so staleness can be tested without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(T, Instant)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// True while a value is stored and younger than the TTL
    pub fn is_fresh(&self, now: Instant) -> bool {
        match &self.entry {
            Some((_, stored_at)) => now.saturating_duration_since(*stored_at) < self.ttl,
            None => false,
        }
    }

    /// Value if still fresh
    pub fn get(&self, now: Instant) -> Option<&T> {
        if self.is_fresh(now) {
            self.peek()
        } else {
            None
        }
    }

    /// Value regardless of age
    pub fn peek(&self) -> Option<&T> {
        self.entry.as_ref().map(|(value, _)| value)
    }

    pub fn stored_at(&self) -> Option<Instant> {
        self.entry.as_ref().map(|(_, stored_at)| *stored_at)
    }

    /// Time left before the value goes stale
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.stored_at()
            .map(|stored_at| self.ttl.saturating_sub(now.saturating_duration_since(stored_at)))
            .filter(|left| !left.is_zero())
    }

    pub fn store(&mut self, value: T, now: Instant) -> &T {
        &self.entry.insert((value, now)).0
    }

    /// Drop the stored value so the next read misses
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
