/*!
 * Raw I/O Types
 * Policies and counters for direct read/write syscalls
 */

/// How raw transfers treat partial writes and interrupted calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoPolicy {
    /// Loop short writes until every byte is accepted
    pub complete_writes: bool,

    /// Reissue calls that fail with EINTR
    pub retry_interrupted: bool,
}

impl IoPolicy {
    /// Exact-count transfers, interrupted calls retried
    pub const fn new() -> Self {
        Self {
            complete_writes: true,
            retry_interrupted: true,
        }
    }

    /// One syscall per transfer, whatever it returns
    pub const fn literal() -> Self {
        Self {
            complete_writes: false,
            retry_interrupted: false,
        }
    }
}

impl Default for IoPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one logical transfer, possibly spanning several syscalls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transfer {
    /// Bytes moved
    pub bytes: usize,

    /// Syscalls that returned successfully
    pub calls: u32,

    /// Syscalls that failed with EINTR and were reissued
    pub interrupted: u32,

    /// Short writes that were followed by another write for the rest
    pub partial_writes: u32,
}

/// Counters for one run of the copy loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Read syscalls issued successfully, including the final zero-byte read
    pub reads: u64,
    pub writes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Interrupted calls that were retried
    pub interrupted: u64,
    /// Short writes completed by a follow-up write
    pub partial_writes: u64,
    /// Chunks whose write stopped short under the literal policy
    pub short_writes: u64,
}

impl CopyStats {
    /// True when every byte read was written back out
    pub fn is_lossless(&self) -> bool {
        self.bytes_read == self.bytes_written
    }
}
