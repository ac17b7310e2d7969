/*!
 * Echo
 * Write one message and a trailing newline with a direct syscall
 */

use crate::core::errors::RawIoResult;
use bytes::{BufMut, BytesMut};
use std::os::fd::BorrowedFd;
use tracing::debug;

use super::raw::write_all;
use super::types::{IoPolicy, Transfer};

/// Write `message` followed by exactly one `\n` to `fd`
///
/// The line goes out as a single buffer, so under the literal policy it
/// is still one syscall.
pub fn echo(fd: BorrowedFd<'_>, message: impl AsRef<[u8]>, policy: IoPolicy) -> RawIoResult<Transfer> {
    let message = message.as_ref();

    let mut line = BytesMut::with_capacity(message.len() + 1);
    line.put_slice(message);
    line.put_u8(b'\n');

    let transfer = write_all(fd, &line, policy)?;
    debug!(bytes = transfer.bytes, calls = transfer.calls, "echoed");
    Ok(transfer)
}
