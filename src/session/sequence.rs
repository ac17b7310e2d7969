/*!
 * Fibonacci Sequence
 */

use crate::core::errors::{SessionError, SessionResult};

/// Fibonacci generator starting from the pair (1, 1)
///
/// Each step moves `(m, n)` to `(n, m + n)` and yields the new `m`, so the
/// terms run 1, 2, 3, 5, 8, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fibonacci {
    current: u64,
    next: u64,
    terms: u64,
}

impl Fibonacci {
    pub const fn new() -> Self {
        Self {
            current: 1,
            next: 1,
            terms: 0,
        }
    }

    /// Terms produced so far
    pub fn terms(&self) -> u64 {
        self.terms
    }

    /// Advance one step, failing instead of wrapping on overflow
    pub fn advance(&mut self) -> SessionResult<u64> {
        let sum = self
            .current
            .checked_add(self.next)
            .ok_or(SessionError::SequenceOverflow { terms: self.terms })?;
        self.current = self.next;
        self.next = sum;
        self.terms += 1;
        Ok(self.current)
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.advance().ok()
    }
}
