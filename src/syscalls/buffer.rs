/*!
 * Byte Buffer
 * Fixed-capacity scratch space for one read/write cycle
 */

use crate::core::errors::{RawIoError, RawIoResult};
use crate::core::limits::MAX_BUFFER_CAPACITY;
use std::os::fd::BorrowedFd;

use super::raw::read_retrying;
use super::types::{IoPolicy, Transfer};

/// Fixed-capacity byte buffer
///
/// Tracks how many bytes the last read produced. Only that prefix is ever
/// handed out for writing, so a write can never exceed what was read.
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl ByteBuffer {
    /// Allocate a zeroed buffer of `capacity` bytes
    pub fn new(capacity: usize) -> RawIoResult<Self> {
        if capacity == 0 || capacity > MAX_BUFFER_CAPACITY {
            return Err(RawIoError::InvalidCapacity(capacity));
        }
        Ok(Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        })
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes produced by the last read
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid prefix from the last read
    #[inline]
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Replace the contents with one read from `fd`
    ///
    /// The previous contents are discarded, never appended to.
    pub fn fill_from(&mut self, fd: BorrowedFd<'_>, policy: IoPolicy) -> RawIoResult<Transfer> {
        self.len = 0;
        let transfer = read_retrying(fd, &mut self.data, policy)?;
        self.len = transfer.bytes;
        Ok(transfer)
    }
}
