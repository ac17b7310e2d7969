/*!
 * Line Reader
 * Deadline-bounded line input over direct read syscalls
 */

use crate::core::errors::{RawIoError, SessionError, SessionResult};
use crate::core::limits::MAX_LINE_LENGTH;
use crate::signals::Deadline;
use crate::syscalls::{ByteBuffer, IoPolicy};
use bytes::BytesMut;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use std::os::fd::BorrowedFd;
use tracing::trace;

/// Result of waiting for input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Ready,
    TimedOut,
    Interrupted,
}

/// Splits raw input into newline-terminated lines
///
/// Waits are bounded by the deadline's remaining time. A wait or read
/// cut short by a signal is counted and retried after the deadline is
/// checked again.
///
/// Reads go through a fixed-capacity `ByteBuffer`, but a line is
/// assembled in a growable pending buffer until its newline arrives.
/// That buffer is capped at the line limit (`MAX_LINE_LENGTH` unless set
/// with `with_line_limit`); a longer line fails with `LineTooLong` and its
/// remaining bytes are dropped up to the next newline.
pub struct LineReader<'fd> {
    fd: BorrowedFd<'fd>,
    buffer: ByteBuffer,
    pending: BytesMut,
    line_limit: usize,
    discarding: bool,
    eof: bool,
    interrupts: u64,
}

impl<'fd> LineReader<'fd> {
    pub fn new(fd: BorrowedFd<'fd>, capacity: usize) -> SessionResult<Self> {
        Ok(Self {
            fd,
            buffer: ByteBuffer::new(capacity)?,
            pending: BytesMut::with_capacity(capacity),
            line_limit: MAX_LINE_LENGTH,
            discarding: false,
            eof: false,
            interrupts: 0,
        })
    }

    /// Cap the length of a single line, terminator excluded
    pub fn with_line_limit(mut self, limit: usize) -> Self {
        self.line_limit = limit;
        self
    }

    /// Waits and reads interrupted by a signal so far
    pub fn interrupts(&self) -> u64 {
        self.interrupts
    }

    /// Next line without its terminator
    ///
    /// A final unterminated line is returned as-is; after that every call
    /// fails with `EndOfInput`.
    pub fn read_line(&mut self, deadline: &Deadline) -> SessionResult<String> {
        loop {
            if let Some(line) = self.take_line()? {
                return Ok(line);
            }

            if self.pending.len() > self.line_limit {
                self.pending.clear();
                self.discarding = !self.eof;
                return Err(SessionError::LineTooLong {
                    limit: self.line_limit,
                });
            }

            if self.eof {
                if self.pending.is_empty() {
                    return Err(SessionError::EndOfInput);
                }
                let rest = self.pending.split();
                return decode(&rest);
            }

            if deadline.expired() {
                return Err(SessionError::DeadlineReached);
            }

            match self.wait_readable(deadline)? {
                Readiness::Ready => self.fill()?,
                Readiness::TimedOut => {}
                Readiness::Interrupted => {
                    self.interrupts += 1;
                    trace!(interrupts = self.interrupts, "wait interrupted");
                }
            }
        }
    }

    fn take_line(&mut self) -> SessionResult<Option<String>> {
        let Some(pos) = self.pending.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let mut line = self.pending.split_to(pos + 1);
        if pos > self.line_limit {
            return Err(SessionError::LineTooLong {
                limit: self.line_limit,
            });
        }
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(pos - 1);
        }
        decode(&line).map(Some)
    }

    fn fill(&mut self) -> SessionResult<()> {
        // Interrupted reads are surfaced so the deadline is rechecked.
        let policy = IoPolicy {
            retry_interrupted: false,
            ..IoPolicy::new()
        };
        match self.buffer.fill_from(self.fd, policy) {
            Ok(transfer) if transfer.bytes == 0 => {
                self.eof = true;
                Ok(())
            }
            Ok(_) => {
                let mut chunk = self.buffer.filled();
                if self.discarding {
                    let Some(pos) = chunk.iter().position(|&b| b == b'\n') else {
                        return Ok(());
                    };
                    self.discarding = false;
                    chunk = &chunk[pos + 1..];
                }
                self.pending.extend_from_slice(chunk);
                Ok(())
            }
            Err(e) if e.is_interrupted() => {
                self.interrupts += 1;
                trace!(interrupts = self.interrupts, "read interrupted");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn wait_readable(&self, deadline: &Deadline) -> SessionResult<Readiness> {
        let millis = deadline.remaining().as_millis().min(u128::from(u16::MAX)) as u16;
        let mut fds = [PollFd::new(self.fd, PollFlags::POLLIN)];

        match poll(&mut fds, PollTimeout::from(millis)) {
            Ok(0) => Ok(Readiness::TimedOut),
            Ok(_) => Ok(Readiness::Ready),
            Err(Errno::EINTR) => Ok(Readiness::Interrupted),
            Err(errno) => Err(RawIoError::from_errno("poll", errno).into()),
        }
    }
}

fn decode(line: &[u8]) -> SessionResult<String> {
    String::from_utf8(line.to_vec()).map_err(|_| SessionError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syscalls::write_bytes;
    use std::io::{Seek, SeekFrom};
    use std::os::fd::AsFd;
    use std::time::Duration;

    fn input(contents: &[u8]) -> std::fs::File {
        let mut file = tempfile::tempfile().unwrap();
        write_bytes(file.as_fd(), contents).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        file
    }

    #[test]
    fn test_lines_split_across_reads() {
        let file = input(b"first line\nsecond\r\nlast");
        let deadline = Deadline::new(Duration::from_secs(60));
        let mut reader = LineReader::new(file.as_fd(), 4).unwrap();

        assert_eq!(reader.read_line(&deadline).unwrap(), "first line");
        assert_eq!(reader.read_line(&deadline).unwrap(), "second");
        assert_eq!(reader.read_line(&deadline).unwrap(), "last");
        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::EndOfInput
        );
        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::EndOfInput
        );
    }

    #[test]
    fn test_invalid_utf8_consumes_line() {
        let file = input(b"\xff\xfe\nok\n");
        let deadline = Deadline::new(Duration::from_secs(60));
        let mut reader = LineReader::new(file.as_fd(), 64).unwrap();

        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::InvalidUtf8
        );
        assert_eq!(reader.read_line(&deadline).unwrap(), "ok");
    }

    #[test]
    fn test_overlong_line_skipped_to_next_newline() {
        let file = input(b"0123456789abc\nok\n");
        let deadline = Deadline::new(Duration::from_secs(60));
        let mut reader = LineReader::new(file.as_fd(), 4).unwrap().with_line_limit(8);

        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::LineTooLong { limit: 8 }
        );
        assert_eq!(reader.read_line(&deadline).unwrap(), "ok");
        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::EndOfInput
        );
    }

    #[test]
    fn test_overlong_terminated_line_in_one_read() {
        let file = input(b"0123456789\nfits\n");
        let deadline = Deadline::new(Duration::from_secs(60));
        let mut reader = LineReader::new(file.as_fd(), 64).unwrap().with_line_limit(8);

        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::LineTooLong { limit: 8 }
        );
        assert_eq!(reader.read_line(&deadline).unwrap(), "fits");
    }

    #[test]
    fn test_expired_deadline_stops_before_reading() {
        let file = input(b"never read\n");
        let deadline = Deadline::new(Duration::ZERO);
        let mut reader = LineReader::new(file.as_fd(), 64).unwrap();

        assert_eq!(
            reader.read_line(&deadline).unwrap_err(),
            SessionError::DeadlineReached
        );
    }
}
