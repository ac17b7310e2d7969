/*!
 * Core Module
 * Errors, limits and configuration shared by every exercise
 */

pub mod config;
pub mod errors;
pub mod limits;

pub use config::RuntimeConfig;
pub use errors::{
    ConfigError, RawIoError, RawIoResult, RawsysError, SessionError, SessionResult, TrapError,
    TrapResult,
};
