/*!
 * rawsys Library
 * Direct-syscall byte transfer and interrupt trapping
 */

pub mod core;
pub mod monitoring;
pub mod session;
pub mod signals;
pub mod syscalls;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::RuntimeConfig;
pub use monitoring::init_tracing;
pub use session::{RecoveryPolicy, Session, SessionSettings, SessionSummary};
pub use signals::{Deadline, InterruptTrap, TrapConfig, TrapState};
pub use syscalls::{copy, echo, ByteBuffer, CopyStats, IoPolicy};
