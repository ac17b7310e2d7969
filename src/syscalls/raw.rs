/*!
 * Direct Syscalls
 * Unbuffered read/write issued by kernel call number
 *
 * These bypass `std::io` entirely: no stream buffering, no automatic
 * retries. A single call may move fewer bytes than requested.
 */

use crate::core::errors::{RawIoError, RawIoResult};
use nix::errno::Errno;
use nix::libc;
use std::os::fd::{AsRawFd, BorrowedFd, RawFd};
use tracing::{trace, warn};

use super::types::{IoPolicy, Transfer};

/// Issue one `write` syscall for all of `bytes`
///
/// Returns the number of bytes the kernel accepted, which may be fewer
/// than `bytes.len()`.
pub fn write_bytes(fd: BorrowedFd<'_>, bytes: &[u8]) -> RawIoResult<usize> {
    write_raw(fd.as_raw_fd(), bytes)
}

/// Issue one `read` syscall into `buffer`, up to its full length
///
/// A return of zero means end of input.
pub fn read_bytes(fd: BorrowedFd<'_>, buffer: &mut [u8]) -> RawIoResult<usize> {
    // SAFETY: `buffer` is valid for `buffer.len()` writes for the duration of the call.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_read,
            fd.as_raw_fd(),
            buffer.as_mut_ptr(),
            buffer.len(),
        )
    };
    check("read", ret)
}

/// `write` on a raw descriptor number
///
/// Async-signal-safe: performs no allocation and takes no locks, so the
/// interrupt handler may call it.
pub(crate) fn write_raw(fd: RawFd, bytes: &[u8]) -> RawIoResult<usize> {
    // SAFETY: `bytes` is valid for `bytes.len()` reads for the duration of the call.
    let ret = unsafe { libc::syscall(libc::SYS_write, fd, bytes.as_ptr(), bytes.len()) };
    check("write", ret)
}

#[inline]
fn check(op: &'static str, ret: libc::c_long) -> RawIoResult<usize> {
    if ret < 0 {
        Err(RawIoError::from_errno(op, Errno::last()))
    } else {
        Ok(ret as usize)
    }
}

/// Write `bytes` following `policy`
///
/// With `complete_writes` the call loops until every byte is accepted;
/// otherwise it stops after the first successful syscall.
pub fn write_all(fd: BorrowedFd<'_>, bytes: &[u8], policy: IoPolicy) -> RawIoResult<Transfer> {
    let mut transfer = Transfer::default();

    while transfer.bytes < bytes.len() {
        match write_bytes(fd, &bytes[transfer.bytes..]) {
            Ok(0) => {
                return Err(RawIoError::WriteZero {
                    remaining: bytes.len() - transfer.bytes,
                })
            }
            Ok(n) => {
                transfer.bytes += n;
                transfer.calls += 1;
                if !policy.complete_writes {
                    break;
                }
                if transfer.bytes < bytes.len() {
                    transfer.partial_writes += 1;
                    trace!(written = n, remaining = bytes.len() - transfer.bytes, "partial write");
                }
            }
            Err(e) if e.is_interrupted() && policy.retry_interrupted => {
                transfer.interrupted += 1;
                trace!("write interrupted, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    if transfer.bytes < bytes.len() {
        warn!(
            written = transfer.bytes,
            requested = bytes.len(),
            "short write left incomplete"
        );
    }

    Ok(transfer)
}

/// Read once into `buffer`, reissuing interrupted calls when `policy` allows
pub fn read_retrying(
    fd: BorrowedFd<'_>,
    buffer: &mut [u8],
    policy: IoPolicy,
) -> RawIoResult<Transfer> {
    let mut transfer = Transfer::default();

    loop {
        match read_bytes(fd, buffer) {
            Ok(n) => {
                transfer.bytes = n;
                transfer.calls += 1;
                return Ok(transfer);
            }
            Err(e) if e.is_interrupted() && policy.retry_interrupted => {
                transfer.interrupted += 1;
                trace!("read interrupted, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};
    use std::os::fd::AsFd;

    #[test]
    fn test_write_then_read_back() {
        let mut file = tempfile::tempfile().unwrap();

        let written = write_bytes(file.as_fd(), b"raw bytes").unwrap();
        assert_eq!(written, 9);

        file.seek(SeekFrom::Start(0)).unwrap();
        let mut buffer = [0u8; 32];
        let n = read_bytes(file.as_fd(), &mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"raw bytes");

        // Exhausted
        assert_eq!(read_bytes(file.as_fd(), &mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_read_respects_buffer_length() {
        let mut file = tempfile::tempfile().unwrap();
        write_bytes(file.as_fd(), b"0123456789").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let mut buffer = [0u8; 4];
        assert_eq!(read_bytes(file.as_fd(), &mut buffer).unwrap(), 4);
        assert_eq!(&buffer, b"0123");
    }

    #[test]
    fn test_bad_descriptor_is_os_error() {
        let err = write_raw(-1, b"x").unwrap_err();
        assert_eq!(
            err,
            RawIoError::Os {
                op: "write",
                errno: Errno::EBADF
            }
        );
    }

    #[test]
    fn test_write_all_empty_issues_no_syscall() {
        let file = tempfile::tempfile().unwrap();
        let transfer = write_all(file.as_fd(), b"", IoPolicy::new()).unwrap();
        assert_eq!(transfer, Transfer::default());
    }

    #[test]
    fn test_write_all_counts_calls() {
        let mut file = tempfile::tempfile().unwrap();
        let transfer = write_all(file.as_fd(), b"hello", IoPolicy::literal()).unwrap();
        assert_eq!(transfer.bytes, 5);
        assert_eq!(transfer.calls, 1);

        file.seek(SeekFrom::Start(0)).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
    }
}
