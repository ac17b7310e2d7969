/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use nix::errno::Errno;
use thiserror::Error;

/// Raw I/O operation result
pub type RawIoResult<T> = Result<T, RawIoError>;

/// Interrupt trap result
pub type TrapResult<T> = Result<T, TrapError>;

/// Interactive session result
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from direct read/write syscalls
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum RawIoError {
    #[error("{op} failed: {errno}")]
    #[diagnostic(
        code(rawio::os_error),
        help("The kernel rejected the call. Check that the descriptor is open and usable.")
    )]
    Os { op: &'static str, errno: Errno },

    #[error("{op} interrupted by a signal")]
    #[diagnostic(
        code(rawio::interrupted),
        help("A signal arrived during a blocking call. Retry or enable interrupt retries.")
    )]
    Interrupted { op: &'static str },

    #[error("write accepted zero bytes with {remaining} bytes remaining")]
    #[diagnostic(code(rawio::write_zero))]
    WriteZero { remaining: usize },

    #[error("invalid buffer capacity: {0}")]
    #[diagnostic(
        code(rawio::invalid_capacity),
        help("Buffer capacity must be greater than zero and at most 16MB.")
    )]
    InvalidCapacity(usize),
}

impl RawIoError {
    /// Classify a failed syscall
    pub fn from_errno(op: &'static str, errno: Errno) -> Self {
        match errno {
            Errno::EINTR => RawIoError::Interrupted { op },
            errno => RawIoError::Os { op, errno },
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, RawIoError::Interrupted { .. })
    }
}

/// Errors from installing or removing the interrupt trap
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum TrapError {
    #[error("failed to install signal handler: {0}")]
    #[diagnostic(code(trap::install_failed))]
    Install(Errno),

    #[error("failed to restore previous signal disposition: {0}")]
    #[diagnostic(code(trap::restore_failed))]
    Restore(Errno),

    #[error("signal {0} cannot be caught")]
    #[diagnostic(
        code(trap::uncatchable),
        help("SIGKILL and SIGSTOP always take their default action.")
    )]
    Uncatchable(nix::sys::signal::Signal),
}

/// Errors raised inside the interactive session
///
/// Every variant is handled by the session's recovery policy except
/// `DeadlineReached`, which ends the session normally.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SessionError {
    #[error("end of input")]
    #[diagnostic(code(session::end_of_input))]
    EndOfInput,

    #[error("deadline reached")]
    #[diagnostic(code(session::deadline))]
    DeadlineReached,

    #[error("sequence overflowed after {terms} terms")]
    #[diagnostic(
        code(session::sequence_overflow),
        help("The sequence restarts on the next round.")
    )]
    SequenceOverflow { terms: u64 },

    #[error("input line is not valid UTF-8")]
    #[diagnostic(code(session::invalid_utf8))]
    InvalidUtf8,

    #[error("input line longer than {limit} bytes")]
    #[diagnostic(
        code(session::line_too_long),
        help("The rest of the line is skipped up to the next newline.")
    )]
    LineTooLong { limit: usize },

    #[error("I/O error: {0}")]
    #[diagnostic(transparent)]
    Io(#[from] RawIoError),
}

impl SessionError {
    /// Errors after which no further round can make progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionError::EndOfInput | SessionError::DeadlineReached)
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected {expected})")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid buffer capacity: {0}")]
    #[diagnostic(
        code(config::invalid_capacity),
        help("Buffer capacity must be greater than zero and at most 16MB.")
    )]
    InvalidCapacity(usize),
}

/// Top-level error for the binary
#[derive(Error, Debug, Diagnostic)]
pub enum RawsysError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] RawIoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Trap(#[from] TrapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
