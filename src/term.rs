// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, alternate screen, RAII cleanup.
//
// Safety: termios (tcgetattr, tcsetattr), ioctl (TIOCGWINSZ), and isatty
// are the standard POSIX interfaces for terminal control; there is no
// safe alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// The studio paints full frames of truecolor cells, so it needs raw mode
// (keys delivered unbuffered, no echo) and the alternate screen (the
// user's shell scrollback untouched). Restore happens on drop and from a
// panic hook, so a crash never leaves the terminal broken.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn query_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

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
pub fn query_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal.
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

// ─── Panic-safe restore ─────────────────────────────────────────────────────

/// Original termios saved for the panic hook, which cannot reach the
/// [`Terminal`] struct.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Leave the alternate screen, reset attributes, show the cursor.
/// Alternate-screen exit goes last so the restored shell has no artifacts.
const RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before the error
/// prints, writing directly to fd 1 to avoid the stdout lock.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            RESTORE.as_ptr().cast::<libc::c_void>(),
            RESTORE.len(),
        );
        if let Ok(guard) = TERMIOS_BACKUP.lock() {
            if let Some(ref saved) = *guard {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, saved);
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// [`enter`](Self::enter) switches to TUI mode (raw mode + alternate
/// screen + hidden cursor); the original state comes back on
/// [`leave`](Self::leave), on drop, and on panic.
pub struct Terminal {
    #[cfg(unix)]
    saved: Option<libc::termios>,
    entered: bool,
    size: Size,
}

impl Terminal {
    /// Create a handle. Fails unless both stdin and stdout are
    /// terminals.
    ///
    /// # Errors
    ///
    /// Returns an error when stdin is not a terminal (raw mode would be
    /// meaningless) or the terminal size cannot be queried.
    pub fn new() -> io::Result<Self> {
        if !is_tty() {
            return Err(io::Error::other("stdin is not a terminal"));
        }
        let size = query_size()
            .ok_or_else(|| io::Error::other("stdout is not a terminal"))?;
        Ok(Self {
            #[cfg(unix)]
            saved: None,
            entered: false,
            size,
        })
    }

    /// Current size (as of the last query).
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query the terminal size (after a suspected resize).
    pub fn refresh_size(&mut self) -> Size {
        if let Some(size) = query_size() {
            self.size = size;
        }
        self.size
    }

    /// Enter TUI mode: raw termios, alternate screen, hidden cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if termios setup or screen switching fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }

        #[cfg(unix)]
        {
            let mut original: libc::termios = unsafe { std::mem::zeroed() };
            if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &mut original) } != 0 {
                return Err(io::Error::last_os_error());
            }

            let mut raw = original;
            unsafe { libc::cfmakeraw(&mut raw) };
            // Blocking reads: deliver each byte as it arrives.
            raw.c_cc[libc::VMIN] = 1;
            raw.c_cc[libc::VTIME] = 0;
            if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw) } != 0 {
                return Err(io::Error::last_os_error());
            }

            self.saved = Some(original);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(original);
            }
        }

        let mut out = io::stdout().lock();
        out.write_all(b"\x1b[?1049h\x1b[2J\x1b[?25l")?;
        out.flush()?;

        install_panic_hook();
        self.entered = true;
        Ok(())
    }

    /// Leave TUI mode and restore the original terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error if the restore sequence cannot be written.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        let mut out = io::stdout().lock();
        out.write_all(RESTORE)?;
        out.flush()?;

        #[cfg(unix)]
        if let Some(saved) = self.saved.take() {
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &saved);
            }
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
