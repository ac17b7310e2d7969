/*!
 * Session Types
 * Recovery policy, settings and run summary
 */

use crate::core::config::RuntimeConfig;
use crate::core::errors::SessionError;
use crate::syscalls::IoPolicy;
use std::fmt;
use std::str::FromStr;

/// What a session does after a round fails
///
/// End of input always ends the session, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum RecoveryPolicy {
    /// Print the fallback message and start a new round
    #[default]
    Continue,
    /// Print the fallback message and return the error
    Exit,
}

impl FromStr for RecoveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(RecoveryPolicy::Continue),
            "exit" => Ok(RecoveryPolicy::Exit),
            other => Err(format!("unknown recovery policy: {}", other)),
        }
    }
}

impl fmt::Display for RecoveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryPolicy::Continue => write!(f, "continue"),
            RecoveryPolicy::Exit => write!(f, "exit"),
        }
    }
}

/// Knobs for one interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub buffer_capacity: usize,
    pub io_policy: IoPolicy,
    pub recovery: RecoveryPolicy,
    pub fallback_message: &'static str,
}

impl From<&RuntimeConfig> for SessionSettings {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            buffer_capacity: config.buffer_capacity,
            io_policy: config.io_policy,
            recovery: config.recovery,
            fallback_message: config.fallback_message,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&RuntimeConfig::new())
    }
}

/// Why a session stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    /// The wall-clock allowance ran out
    Deadline,
    /// Input was exhausted
    EndOfInput,
    /// A round failed under `RecoveryPolicy::Exit`
    Failed(SessionError),
}

/// Counters for a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Rounds started
    pub rounds: u64,
    /// Complete lines consumed from input
    pub lines: u64,
    /// Sequence terms printed
    pub terms: u64,
    /// Failed rounds that printed the fallback message
    pub recoveries: u64,
    /// Waits cut short by a signal
    pub interrupts: u64,
    pub end: EndReason,
}

impl SessionSummary {
    pub(crate) fn new() -> Self {
        Self {
            rounds: 0,
            lines: 0,
            terms: 0,
            recoveries: 0,
            interrupts: 0,
            end: EndReason::Deadline,
        }
    }
}
