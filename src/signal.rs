use std::{
    io::{self, Write},
    os::fd::{AsFd, AsRawFd},
    process,
    sync::mpsc,
    thread,
};

use log::{info, warn};
use nix::{
    fcntl::{fcntl, FcntlArg, OFlag},
    sys::signal::{SigSet, Signal},
    unistd,
};

use crate::{Error, Result};

const SHUTDOWN_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

/// blocks the shutdown signals on the calling thread, then spawns a thread that
/// waits for them.
///
/// the first signal is reported once over the returned channel. a second one
/// means the run loop is stuck, so the listener shows the cursor itself and
/// exits the process. must run before any other thread is spawned so that
/// every thread inherits the mask and only the listener ever sees the signal.
pub fn listen() -> Result<mpsc::Receiver<()>> {
    let signals = shutdown_set();
    signals.thread_block()?;

    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name("signal".into())
        .spawn(move || wait_loop(signals, sender))
        .map_err(Error::Spawn)?;

    Ok(receiver)
}

fn shutdown_set() -> SigSet {
    let mut signals = SigSet::empty();
    for signal in SHUTDOWN_SIGNALS {
        signals.add(signal);
    }
    signals
}

fn wait_loop(signals: SigSet, sender: mpsc::Sender<()>) {
    match signals.wait() {
        Ok(signal) => {
            info!("received {signal:?}, shutting down");
            // the run loop may already be gone
            let _ = sender.send(());
        }
        Err(error) => {
            warn!("waiting for shutdown signals failed: {error}");
            return;
        }
    }

    match signals.wait() {
        Ok(signal) => warn!("received {signal:?} again, exiting without waiting for the frame"),
        Err(error) => {
            warn!("waiting for shutdown signals failed: {error}");
            return;
        }
    }
    if let Err(error) = show_cursor_now() {
        warn!("could not restore the cursor: {error}");
    }
    process::exit(0);
}

/// writes the show-cursor sequence straight to fd 1, without blocking.
///
/// the run loop holds the stdout lock and may be stuck in a write, so this
/// goes around `std::io::Stdout`. the descriptor flags are put back afterwards.
fn show_cursor_now() -> io::Result<()> {
    let stdout = io::stdout();
    let fd = stdout.as_raw_fd();
    let flags = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL)?);
    fcntl(fd, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK))?;

    let mut sequence = Vec::new();
    write!(sequence, "{}", termion::cursor::Show)?;
    let written = unistd::write(stdout.as_fd(), &sequence);

    fcntl(fd, FcntlArg::F_SETFL(flags))?;
    written?;
    Ok(())
}
