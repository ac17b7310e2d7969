/*!
 * Deadline
 * Fixed wall-clock allowance measured from a start instant
 */

use std::time::{Duration, Instant};

/// Start instant plus a fixed allowance; read-only once built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start: Instant,
    allowance: Duration,
}

impl Deadline {
    /// Deadline `allowance` from now
    pub fn new(allowance: Duration) -> Self {
        Self::starting_at(Instant::now(), allowance)
    }

    pub fn starting_at(start: Instant, allowance: Duration) -> Self {
        Self { start, allowance }
    }

    pub fn allowance(&self) -> Duration {
        self.allowance
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self) -> Duration {
        self.allowance.saturating_sub(self.elapsed())
    }

    /// True once elapsed time meets or exceeds the allowance
    #[inline]
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.allowance
    }
}
