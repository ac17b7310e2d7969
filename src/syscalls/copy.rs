/*!
 * Copy Loop
 * Descriptor-to-descriptor copy through a single reused buffer
 */

use crate::core::errors::RawIoResult;
use std::os::fd::BorrowedFd;
use tracing::{debug, instrument};

use super::buffer::ByteBuffer;
use super::raw::write_all;
use super::types::{CopyStats, IoPolicy};

/// Copy `input` to `output` until end of input
///
/// Each iteration reads up to the buffer's capacity and writes exactly the
/// bytes that read produced. A zero-byte read ends the loop and no further
/// read is issued. Any other failure is returned immediately.
#[instrument(skip_all, fields(capacity = buffer.capacity()))]
pub fn copy(
    input: BorrowedFd<'_>,
    output: BorrowedFd<'_>,
    buffer: &mut ByteBuffer,
    policy: IoPolicy,
) -> RawIoResult<CopyStats> {
    let mut stats = CopyStats::default();

    loop {
        let read = buffer.fill_from(input, policy)?;
        stats.reads += 1;
        stats.interrupted += u64::from(read.interrupted);

        if read.bytes == 0 {
            debug!(
                bytes = stats.bytes_written,
                reads = stats.reads,
                "end of input"
            );
            return Ok(stats);
        }
        stats.bytes_read += read.bytes as u64;

        let written = write_all(output, buffer.filled(), policy)?;
        stats.writes += u64::from(written.calls);
        stats.bytes_written += written.bytes as u64;
        stats.interrupted += u64::from(written.interrupted);
        stats.partial_writes += u64::from(written.partial_writes);
        if written.bytes < read.bytes {
            stats.short_writes += 1;
        }
    }
}

/// `copy` with a freshly allocated buffer of `capacity` bytes
pub fn copy_with_capacity(
    input: BorrowedFd<'_>,
    output: BorrowedFd<'_>,
    capacity: usize,
    policy: IoPolicy,
) -> RawIoResult<CopyStats> {
    let mut buffer = ByteBuffer::new(capacity)?;
    copy(input, output, &mut buffer, policy)
}
