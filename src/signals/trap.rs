/*!
 * Interrupt Trap
 * Owned registration of a notice-printing signal handler
 *
 * The handler runs in signal context, so everything it touches lives in
 * process-wide atomics and its only syscall is `write`.
 */

use crate::core::errors::{TrapError, TrapResult};
use crate::syscalls::raw::write_raw;
use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::fmt;
use std::ptr;
use std::sync::atomic::{AtomicI32, AtomicPtr, AtomicU64, Ordering};
use tracing::{debug, error, info};

use super::types::{TrapConfig, TrapState};

/// Times the handler has fired since process start; never reset
static TRIGGER_COUNT: AtomicU64 = AtomicU64::new(0);

static NOTICE_FD: AtomicI32 = AtomicI32::new(libc::STDOUT_FILENO);

// Slots are leaked so a handler racing a reinstall never reads freed memory.
static NOTICE: AtomicPtr<&'static str> = AtomicPtr::new(ptr::null_mut());

extern "C" fn on_signal(_signal: libc::c_int) {
    let saved = Errno::last_raw();

    TRIGGER_COUNT.fetch_add(1, Ordering::SeqCst);

    let slot = NOTICE.load(Ordering::Acquire);
    if !slot.is_null() {
        // SAFETY: non-null slots come from `Box::leak` in `publish` and are never freed.
        let notice: &'static str = unsafe { *slot };
        if !notice.is_empty() {
            let _ = write_raw(NOTICE_FD.load(Ordering::Acquire), notice.as_bytes());
        }
    }

    Errno::set_raw(saved);
}

fn publish(config: &TrapConfig) {
    let slot: &'static mut &'static str = Box::leak(Box::new(config.notice));
    NOTICE_FD.store(config.notice_fd, Ordering::Release);
    NOTICE.store(slot, Ordering::Release);
}

/// Process-wide count of handler invocations
pub fn trigger_count() -> u64 {
    TRIGGER_COUNT.load(Ordering::SeqCst)
}

/// Installed signal handler
///
/// While alive, the configured signal prints the notice and returns
/// control to the interrupted code instead of taking its default action.
/// Blocking calls in progress fail with EINTR because the handler is
/// installed without `SA_RESTART`. Dropping the trap restores the
/// disposition it replaced.
///
/// Installing a second trap for the same signal replaces the handler and
/// notice; drop traps in reverse order of installation.
pub struct InterruptTrap {
    signal: Signal,
    previous: Option<SigAction>,
    baseline: u64,
}

impl InterruptTrap {
    /// Install the handler described by `config`
    pub fn install(config: TrapConfig) -> TrapResult<Self> {
        if matches!(config.signal, Signal::SIGKILL | Signal::SIGSTOP) {
            return Err(TrapError::Uncatchable(config.signal));
        }

        publish(&config);

        let action = SigAction::new(
            SigHandler::Handler(on_signal),
            SaFlags::empty(),
            SigSet::empty(),
        );
        // SAFETY: `on_signal` only touches atomics and issues `write`.
        let previous = unsafe { sigaction(config.signal, &action) }.map_err(TrapError::Install)?;

        info!(signal = %config.signal, notice_fd = config.notice_fd, "interrupt trap armed");

        Ok(Self {
            signal: config.signal,
            previous: Some(previous),
            baseline: trigger_count(),
        })
    }

    /// Install with the default configuration (SIGINT, notice on stdout)
    pub fn install_default() -> TrapResult<Self> {
        Self::install(TrapConfig::new())
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Handler invocations since this trap was installed
    pub fn fired(&self) -> u64 {
        trigger_count().saturating_sub(self.baseline)
    }

    pub fn state(&self) -> TrapState {
        if self.fired() > 0 {
            TrapState::Triggered
        } else {
            TrapState::Armed
        }
    }

    /// Restore the previous disposition, reporting failures
    pub fn uninstall(mut self) -> TrapResult<()> {
        self.restore()
    }

    fn restore(&mut self) -> TrapResult<()> {
        let Some(previous) = self.previous.take() else {
            return Ok(());
        };

        // SAFETY: `previous` was returned by `sigaction` for this signal.
        unsafe { sigaction(self.signal, &previous) }.map_err(TrapError::Restore)?;
        debug!(signal = %self.signal, fired = self.fired(), "interrupt trap removed");
        Ok(())
    }
}

impl fmt::Debug for InterruptTrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptTrap")
            .field("signal", &self.signal)
            .field("installed", &self.previous.is_some())
            .field("fired", &self.fired())
            .finish()
    }
}

impl Drop for InterruptTrap {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!(error = %e, "failed to restore signal disposition");
        }
    }
}
