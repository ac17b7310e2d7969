/*!
 * System Limits and Constants
 *
 * Centralized location for buffer sizes, descriptors, timeouts and the
 * fixed messages printed by the exercises.
 */

use std::time::Duration;

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// Conventional input descriptor
pub const STDIN_FD: i32 = 0;

/// Conventional output descriptor
pub const STDOUT_FD: i32 = 1;

// =============================================================================
// BUFFERS
// =============================================================================

/// Default copy buffer capacity (256 bytes)
/// Large enough for interactive line lengths
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Largest buffer accepted from configuration (16MB)
pub const MAX_BUFFER_CAPACITY: usize = 16 * 1024 * 1024;

/// Longest input line the session reader holds before giving up on it
pub const MAX_LINE_LENGTH: usize = MAX_BUFFER_CAPACITY;

// =============================================================================
// SESSION
// =============================================================================

/// Wall-clock allowance for the interactive session
pub const DEFAULT_ALLOWED_RUN_TIME: Duration = Duration::from_secs(60);

/// Notice written by the interrupt handler
pub const DEFAULT_INTERRUPT_NOTICE: &str = "\nI caught SIGINT!\n";

/// Fallback message printed when a session round fails
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Hheheheheh";
