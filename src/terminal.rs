use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, Termios};
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};

const STDIN_FILENO: RawFd = libc::STDIN_FILENO;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// True if a SIGINT has been observed since the last time this, or the
/// process, started. Checked by the execution loop between instructions so
/// shutdown happens at a deterministic point rather than inside signal
/// context.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Installs the SIGINT handler. Safe to call more than once.
pub fn install_interrupt_handler() {
    unsafe {
        libc::signal(libc::SIGINT, on_sigint as libc::sighandler_t);
    }
}

/// Puts the controlling terminal into non-canonical, no-echo mode for the
/// lifetime of this guard, restoring the prior `termios` attributes on drop
/// (normal return, early return, or unwinding from a panic).
pub struct TerminalGuard {
    original: Termios,
}

impl TerminalGuard {
    pub fn enable_raw_mode() -> nix::Result<Self> {
        let original = tcgetattr(STDIN_FILENO)?;

        let mut raw = original.clone();
        raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);
        tcsetattr(STDIN_FILENO, SetArg::TCSANOW, &raw)?;

        Ok(Self { original })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = tcsetattr(STDIN_FILENO, SetArg::TCSANOW, &self.original);
    }
}
