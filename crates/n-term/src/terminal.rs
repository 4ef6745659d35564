// SPDX-License-Identifier: MIT
//
// Raw keyboard input for an inline prompt, and getting the terminal back.
//
// termios, ioctl(TIOCGWINSZ), isatty and the emergency fd write are all
// libc calls, so this module allows `unsafe`. Each block wraps one call.
#![allow(unsafe_code)]
//
// An inline prompt needs much less than a full-screen application: no
// alternate screen, no mouse, no keyboard protocol negotiation. It needs
// keys one at a time without echo (raw input), output post-processing left
// ON so `\n` still means "next line, column 0", and a guarantee that the
// user gets their terminal back: termios restored and the cursor visible,
// even if something panics mid-frame.
//
// The prompt draws on stderr, leaving stdout to whatever the program prints
// once the prompt is done. Size queries, the restore sequence and the
// emergency write all target that same stream.
//
// The panic hook bypasses Rust's stderr handle, writing a pre-built restore
// sequence directly to fd 2, so a panic mid-redraw cannot deadlock on it.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Size assumed when the terminal cannot be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// File descriptor the prompt is drawn on.
#[cfg(unix)]
pub const PROMPT_FD: libc::c_int = libc::STDERR_FILENO;

/// Query the size of the terminal the prompt is drawn on, via
/// `ioctl(TIOCGWINSZ)` on [`PROMPT_FD`].
///
/// Returns `None` if stderr is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(PROMPT_FD, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

/// Whether the prompt's output stream is a terminal.
#[cfg(unix)]
fn output_is_tty() -> bool {
    unsafe { libc::isatty(PROMPT_FD) != 0 }
}

#[cfg(not(unix))]
fn output_is_tty() -> bool {
    false
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Emergency restore: turn bracketed paste off, reset SGR attributes, show
/// the cursor, start a fresh line so the panic message does not land inside
/// the prompt.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[?2004l\x1b[0m\x1b[?25h\r\n";

/// The panic hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the restore sequence straight to the prompt's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            PROMPT_FD,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stderr().write_all(EMERGENCY_RESTORE);
        let _ = io::stderr().flush();
    }
}

// ─── RawMode ────────────────────────────────────────────────────────────────

/// Raw keyboard input with RAII cleanup.
///
/// [`enter`](Self::enter) switches stdin to raw mode: no echo, no line
/// buffering, no signal generation (Ctrl+C arrives as a key). Output
/// processing is kept, so the prompt can write ordinary newlines. When
/// stderr is a terminal too, bracketed paste is switched on so pasted text
/// arrives as one `Paste` event. The original mode is restored and the
/// cursor shown when the guard is dropped, even on panic.
///
/// When stdin is not a TTY (pipes, tests) entering is a no-op that still
/// reports success.
///
/// # Example
///
/// ```no_run
/// use n_term::terminal::RawMode;
///
/// let mut raw = RawMode::new();
/// raw.enter()?;
/// // ... read keys, redraw the prompt ...
/// // Terminal is restored automatically on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RawMode {
    /// Original termios saved before entering raw mode.
    #[cfg(unix)]
    original_termios: Option<libc::termios>,

    active: bool,
    /// Bracketed paste was requested from the terminal.
    paste: bool,
}

impl RawMode {
    /// Create an inactive guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            #[cfg(unix)]
            original_termios: None,
            active: false,
            paste: false,
        }
    }

    /// Whether raw mode is currently on.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter raw mode. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if termios cannot be read or written.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        install_panic_hook();
        self.enable_raw_mode()?;
        self.active = true;

        // Only a terminal on both ends can send a bracketed paste.
        if is_tty() && output_is_tty() {
            let mut err = io::stderr().lock();
            ansi::enable_bracketed_paste(&mut err)?;
            err.flush()?;
            self.paste = true;
        }
        Ok(())
    }

    /// Leave raw mode, turn bracketed paste back off, reset attributes, and
    /// show the cursor. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let mut err = io::stderr().lock();
        err.write_all(&restore_sequence(self.paste)?)?;
        err.flush()?;
        drop(err);
        self.paste = false;

        self.disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    // ── termios ─────────────────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        use std::os::unix::io::AsRawFd;

        if !is_tty() {
            return Ok(());
        }

        let fd = io::stdin().as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original_termios = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            // Input side of cfmakeraw. OPOST stays on.
            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;

            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            use std::os::unix::io::AsRawFd;
            let fd = io::stdin().as_raw_fd();

            unsafe {
                if libc::tcsetattr(fd, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
            self.original_termios = None;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Bytes that undo what a prompt session may have changed on its output.
fn restore_sequence(paste: bool) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(24);
    if paste {
        ansi::disable_bracketed_paste(&mut out)?;
    }
    ansi::reset(&mut out)?;
    ansi::cursor_show(&mut out)?;
    Ok(out)
}

impl Default for RawMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_size_is_classic() {
        assert_eq!(Size::FALLBACK, Size { cols: 80, rows: 24 });
    }

    #[test]
    fn get_size_does_not_panic() {
        let _ = get_size();
    }

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }

    #[test]
    fn emergency_restore_shows_cursor_and_resets() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.contains("\x1b[?2004l"), "must disable bracketed paste");
        assert!(s.contains("\x1b[0m"), "must reset SGR attributes");
        assert!(s.contains("\x1b[?25h"), "must show cursor");
        assert!(s.ends_with("\r\n"));
    }

    #[cfg(unix)]
    #[test]
    fn prompt_is_drawn_on_stderr() {
        assert_eq!(PROMPT_FD, libc::STDERR_FILENO);
    }

    #[test]
    fn restore_turns_paste_off_only_when_it_was_on() {
        let with = String::from_utf8(restore_sequence(true).unwrap()).unwrap();
        assert_eq!(with, "\x1b[?2004l\x1b[0m\x1b[?25h");
        let without = String::from_utf8(restore_sequence(false).unwrap()).unwrap();
        assert_eq!(without, "\x1b[0m\x1b[?25h");
    }

    #[test]
    fn new_is_inactive() {
        assert!(!RawMode::new().is_active());
    }

    #[test]
    fn enter_leave_cycle() {
        let mut raw = RawMode::new();
        raw.enter().unwrap();
        assert!(raw.is_active());
        raw.enter().unwrap();
        assert!(raw.is_active());
        raw.leave().unwrap();
        assert!(!raw.is_active());
        raw.leave().unwrap();
        assert!(!raw.is_active());
    }

    #[test]
    fn drop_after_enter() {
        let mut raw = RawMode::new();
        raw.enter().unwrap();
        drop(raw);
    }
}
