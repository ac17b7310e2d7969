/*!
 * Syscalls Module
 * Raw byte transfer between descriptors by direct kernel call
 */

pub mod buffer;
pub mod copy;
pub mod echo;
pub mod raw;
pub mod types;

// Re-export public API
pub use buffer::ByteBuffer;
pub use copy::{copy, copy_with_capacity};
pub use echo::echo;
pub use raw::{read_bytes, read_retrying, write_all, write_bytes};
pub use types::{CopyStats, IoPolicy, Transfer};
