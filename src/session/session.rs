/*!
 * Interactive Session
 * Echo-then-Fibonacci rounds under a wall-clock deadline
 *
 * A round reads one line and echoes it, then prints the next Fibonacci
 * term for every further line. A round only ends through an error; the
 * recovery policy decides what happens next.
 */

use crate::core::errors::{SessionError, SessionResult};
use crate::signals::Deadline;
use crate::syscalls::echo;
use std::convert::Infallible;
use std::os::fd::BorrowedFd;
use tracing::{debug, info, instrument, warn};

use super::reader::LineReader;
use super::sequence::Fibonacci;
use super::types::{EndReason, RecoveryPolicy, SessionSettings, SessionSummary};

pub struct Session<'fd> {
    reader: LineReader<'fd>,
    output: BorrowedFd<'fd>,
    deadline: Deadline,
    settings: SessionSettings,
    summary: SessionSummary,
}

impl<'fd> Session<'fd> {
    pub fn new(
        input: BorrowedFd<'fd>,
        output: BorrowedFd<'fd>,
        deadline: Deadline,
        settings: SessionSettings,
    ) -> SessionResult<Self> {
        Ok(Self {
            reader: LineReader::new(input, settings.buffer_capacity)?,
            output,
            deadline,
            settings,
            summary: SessionSummary::new(),
        })
    }

    /// Run rounds until the deadline, end of input, or a failure under
    /// `RecoveryPolicy::Exit`
    ///
    /// Syscall failures are fatal and return immediately, without the
    /// fallback message.
    #[instrument(skip_all)]
    pub fn run(mut self) -> SessionResult<SessionSummary> {
        while !self.deadline.expired() {
            self.summary.rounds += 1;

            let err = match self.round() {
                Ok(never) => match never {},
                Err(err) => err,
            };

            match err {
                SessionError::DeadlineReached => {
                    self.summary.end = EndReason::Deadline;
                    break;
                }
                SessionError::Io(_) => return Err(err),
                _ => {}
            }

            warn!(error = %err, round = self.summary.rounds, "round failed");
            self.summary.recoveries += 1;
            self.print(self.settings.fallback_message.as_bytes())?;

            if err.is_terminal() {
                self.summary.end = EndReason::EndOfInput;
                break;
            }
            if self.settings.recovery == RecoveryPolicy::Exit {
                self.summary.end = EndReason::Failed(err.clone());
                self.summary.interrupts = self.reader.interrupts();
                info!(summary = ?self.summary, "session stopped");
                return Err(err);
            }
        }

        self.summary.interrupts = self.reader.interrupts();
        info!(summary = ?self.summary, "session finished");
        Ok(self.summary)
    }

    fn round(&mut self) -> SessionResult<Infallible> {
        let first = self.next_line()?;
        self.print(first.as_bytes())?;

        let mut sequence = Fibonacci::new();
        loop {
            self.next_line()?;
            let term = sequence.advance()?;
            self.summary.terms += 1;
            self.print(term.to_string().as_bytes())?;
        }
    }

    fn next_line(&mut self) -> SessionResult<String> {
        if self.deadline.expired() {
            return Err(SessionError::DeadlineReached);
        }
        let line = self.reader.read_line(&self.deadline)?;
        self.summary.lines += 1;
        debug!(line = %line, "line read");
        Ok(line)
    }

    fn print(&self, bytes: &[u8]) -> SessionResult<()> {
        echo(self.output, bytes, self.settings.io_policy)?;
        Ok(())
    }
}
