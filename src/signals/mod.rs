/*!
 * Signals Module
 * Interrupt trapping and the wall-clock deadline that bounds a run
 */

mod deadline;
mod trap;
pub mod types;

// Re-export public API
pub use deadline::Deadline;
pub use trap::{trigger_count, InterruptTrap};
pub use types::{TrapConfig, TrapState};
