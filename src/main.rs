/*!
 * rawsys - Main Entry Point
 *
 * Three exercises over direct syscalls:
 * - echo: write one argument and a newline
 * - cat: copy stdin to stdout
 * - trap: trap SIGINT while generating Fibonacci terms under a deadline
 */

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io;
use std::os::fd::AsFd;
use std::os::unix::ffi::OsStrExt;
use std::time::{Duration, Instant};
use tracing::info;

use rawsys::core::limits::STDOUT_FD;
use rawsys::syscalls::copy_with_capacity;
use rawsys::{
    echo, init_tracing, Deadline, InterruptTrap, RawsysError, RecoveryPolicy, RuntimeConfig,
    Session, SessionSettings, TrapConfig,
};

#[derive(Debug, Parser)]
#[command(name = "rawsys", version, about = "Raw syscall I/O and signal trapping exercises")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write MESSAGE and a newline to stdout with a direct write syscall
    Echo {
        message: OsString,

        /// Issue exactly one write and accept a short result
        #[arg(long)]
        literal: bool,
    },

    /// Copy stdin to stdout with direct read/write syscalls
    Cat {
        /// Copy buffer capacity in bytes
        #[arg(long, value_name = "BYTES")]
        buffer_capacity: Option<usize>,

        /// One write per chunk, no retry on interrupted calls
        #[arg(long)]
        literal: bool,
    },

    /// Trap SIGINT while echoing a line, then printing Fibonacci terms
    Trap {
        /// Wall-clock allowance for the whole session
        #[arg(long, value_name = "SECS")]
        allowed_run_time: Option<u64>,

        /// What to do after a failed round
        #[arg(long, value_enum)]
        recovery: Option<RecoveryPolicy>,
    },
}

fn main() -> miette::Result<()> {
    let started = Instant::now();
    init_tracing();

    let cli = Cli::parse();
    run(cli.command, started)?;
    Ok(())
}

fn run(command: Command, started: Instant) -> Result<(), RawsysError> {
    match command {
        Command::Echo { message, literal } => {
            let config = preset(literal).apply_env()?;
            let stdout = io::stdout();
            echo(stdout.as_fd(), message.as_bytes(), config.io_policy)?;
        }

        Command::Cat {
            buffer_capacity,
            literal,
        } => {
            let mut config = preset(literal).apply_env()?;
            if let Some(capacity) = buffer_capacity {
                config = config.with_buffer_capacity(capacity)?;
            }

            let stdin = io::stdin();
            let stdout = io::stdout();
            let stats = copy_with_capacity(
                stdin.as_fd(),
                stdout.as_fd(),
                config.buffer_capacity,
                config.io_policy,
            )?;
            info!(?stats, "copy finished");
        }

        Command::Trap {
            allowed_run_time,
            recovery,
        } => {
            let mut config = RuntimeConfig::new().apply_env()?;
            if let Some(secs) = allowed_run_time {
                config.allowed_run_time = Duration::from_secs(secs);
            }
            if let Some(recovery) = recovery {
                config.recovery = recovery;
            }

            let deadline = Deadline::starting_at(started, config.allowed_run_time);
            let trap = InterruptTrap::install(
                TrapConfig::new()
                    .with_notice(config.interrupt_notice)
                    .with_notice_fd(STDOUT_FD),
            )?;

            let stdin = io::stdin();
            let stdout = io::stdout();
            let session = Session::new(
                stdin.as_fd(),
                stdout.as_fd(),
                deadline,
                SessionSettings::from(&config),
            )?;
            let summary = session.run()?;

            info!(fired = trap.fired(), state = %trap.state(), ?summary, "trap session done");
            trap.uninstall()?;
        }
    }

    Ok(())
}

fn preset(literal: bool) -> RuntimeConfig {
    if literal {
        RuntimeConfig::literal()
    } else {
        RuntimeConfig::new()
    }
}
