/*!
 * Signal Types
 * Trap configuration and state
 */

use crate::core::limits::{DEFAULT_INTERRUPT_NOTICE, STDOUT_FD};
use nix::sys::signal::Signal;
use std::fmt;
use std::os::fd::RawFd;

/// Lifecycle of an installed trap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapState {
    /// Handler installed, default action suppressed
    Armed,
    /// Handler has fired at least once
    Triggered,
}

impl fmt::Display for TrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrapState::Armed => write!(f, "armed"),
            TrapState::Triggered => write!(f, "triggered"),
        }
    }
}

/// What the handler does and where it reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapConfig {
    /// Signal to intercept (default: SIGINT)
    pub signal: Signal,

    /// Written verbatim each time the handler fires; empty writes nothing
    pub notice: &'static str,

    /// Descriptor the notice goes to (default: stdout)
    pub notice_fd: RawFd,
}

impl TrapConfig {
    pub fn new() -> Self {
        Self {
            signal: Signal::SIGINT,
            notice: DEFAULT_INTERRUPT_NOTICE,
            notice_fd: STDOUT_FD,
        }
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = signal;
        self
    }

    pub fn with_notice(mut self, notice: &'static str) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_notice_fd(mut self, fd: RawFd) -> Self {
        self.notice_fd = fd;
        self
    }
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self::new()
    }
}
