/*!
 * Runtime Configuration
 *
 * Presets plus environment overrides for buffer sizing, I/O policy and the
 * interactive session.
 */

use super::errors::ConfigError;
use super::limits::{
    DEFAULT_ALLOWED_RUN_TIME, DEFAULT_BUFFER_CAPACITY, DEFAULT_FALLBACK_MESSAGE,
    DEFAULT_INTERRUPT_NOTICE, MAX_BUFFER_CAPACITY,
};
use crate::session::RecoveryPolicy;
use crate::syscalls::IoPolicy;
use std::time::Duration;

/// Copy buffer capacity in bytes
pub const ENV_BUFFER_CAPACITY: &str = "RAWSYS_BUFFER_CAPACITY";

/// Session allowance in whole seconds
pub const ENV_ALLOWED_RUN_TIME: &str = "RAWSYS_ALLOWED_RUN_TIME_SECS";

/// Session recovery policy (`continue` or `exit`)
pub const ENV_RECOVERY: &str = "RAWSYS_RECOVERY";

/// Configuration shared by every exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Capacity of the copy buffer (default: 256 bytes)
    pub buffer_capacity: usize,

    /// Partial-write and interrupt handling for raw I/O
    pub io_policy: IoPolicy,

    /// Wall-clock allowance for the interactive session (default: 60s)
    pub allowed_run_time: Duration,

    /// What the session does after a failed round
    pub recovery: RecoveryPolicy,

    /// Written by the interrupt handler
    pub interrupt_notice: &'static str,

    /// Printed after a failed round
    pub fallback_message: &'static str,
}

impl RuntimeConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            io_policy: IoPolicy::default(),
            allowed_run_time: DEFAULT_ALLOWED_RUN_TIME,
            recovery: RecoveryPolicy::Continue,
            interrupt_notice: DEFAULT_INTERRUPT_NOTICE,
            fallback_message: DEFAULT_FALLBACK_MESSAGE,
        }
    }

    /// Single-shot writes and no interrupt retries
    pub fn literal() -> Self {
        Self {
            io_policy: IoPolicy::literal(),
            ..Self::new()
        }
    }

    /// Apply environment overrides on top of `self`
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_BUFFER_CAPACITY) {
            let capacity = value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_BUFFER_CAPACITY,
                value: value.clone(),
                expected: "a positive byte count",
            })?;
            self = self.with_buffer_capacity(capacity)?;
        }

        if let Some(value) = lookup(ENV_ALLOWED_RUN_TIME) {
            let secs = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_ALLOWED_RUN_TIME,
                value: value.clone(),
                expected: "a whole number of seconds",
            })?;
            self.allowed_run_time = Duration::from_secs(secs);
        }

        if let Some(value) = lookup(ENV_RECOVERY) {
            self.recovery = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_RECOVERY,
                value: value.clone(),
                expected: "`continue` or `exit`",
            })?;
        }

        Ok(self)
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 || capacity > MAX_BUFFER_CAPACITY {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        self.buffer_capacity = capacity;
        Ok(self)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.buffer_capacity, 256);
        assert_eq!(config.allowed_run_time, Duration::from_secs(60));
        assert_eq!(config.recovery, RecoveryPolicy::Continue);
        assert!(config.io_policy.complete_writes);
    }

    #[test]
    fn test_literal_preset() {
        let config = RuntimeConfig::literal();
        assert!(!config.io_policy.complete_writes);
        assert!(!config.io_policy.retry_interrupted);
        assert_eq!(config.buffer_capacity, 256);
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::new()
            .with_overrides(lookup(&[
                (ENV_BUFFER_CAPACITY, "4096"),
                (ENV_ALLOWED_RUN_TIME, "5"),
                (ENV_RECOVERY, "exit"),
            ]))
            .unwrap();

        assert_eq!(config.buffer_capacity, 4096);
        assert_eq!(config.allowed_run_time, Duration::from_secs(5));
        assert_eq!(config.recovery, RecoveryPolicy::Exit);
    }

    #[test]
    fn test_invalid_overrides() {
        let err = RuntimeConfig::new()
            .with_overrides(lookup(&[(ENV_BUFFER_CAPACITY, "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: ENV_BUFFER_CAPACITY, .. }));

        let err = RuntimeConfig::new()
            .with_overrides(lookup(&[(ENV_BUFFER_CAPACITY, "0")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity(0));

        assert!(RuntimeConfig::new()
            .with_overrides(lookup(&[(ENV_RECOVERY, "retry")]))
            .is_err());
    }
}
