/*!
 * Session Module
 * Interactive sequence generator driven by raw line input
 */

mod reader;
mod sequence;
#[allow(clippy::module_inception)]
mod session;
pub mod types;

// Re-export public API
pub use reader::LineReader;
pub use sequence::Fibonacci;
pub use session::Session;
pub use types::{EndReason, RecoveryPolicy, SessionSettings, SessionSummary};
