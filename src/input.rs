// SPDX-License-Identifier: MIT
//
// Terminal input — raw stdin bytes to key events.
//
// The studio's keyboard surface is small: printable characters, the
// arrow keys, Enter, and Escape. The parser keeps a tiny pending buffer
// because a lone ESC is ambiguous (Escape key vs. the start of a CSI
// sequence) — after a timeout with no new bytes, [`Parser::flush`]
// resolves the pending ESC as a real Escape keypress.
//
// A dedicated thread reads stdin in blocking mode and sends byte chunks
// through a channel, so the main loop can use `recv_timeout` for its
// event/tick model.
#![allow(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

// ─── Key ────────────────────────────────────────────────────────────────────

/// A parsed keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (Space arrives as `Char(' ')`).
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Incremental byte-to-key parser.
///
/// Feed chunks with [`advance`](Self::advance); call
/// [`flush`](Self::flush) when input has gone quiet to resolve a
/// pending lone ESC.
#[derive(Debug, Default)]
pub struct Parser {
    pending: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if bytes are buffered waiting for sequence completion.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Consume a chunk of stdin bytes, returning completed keys.
    pub fn advance(&mut self, bytes: &[u8]) -> Vec<Key> {
        self.pending.extend_from_slice(bytes);
        let mut keys = Vec::new();

        loop {
            match self.parse_front() {
                Some((key, used)) => {
                    self.pending.drain(..used);
                    if let Some(key) = key {
                        keys.push(key);
                    }
                }
                None => break, // Incomplete sequence — wait for more bytes.
            }
        }

        keys
    }

    /// Resolve pending bytes after an input lull: a buffered lone ESC
    /// becomes the Escape key, anything else is dropped.
    pub fn flush(&mut self) -> Vec<Key> {
        let pending = std::mem::take(&mut self.pending);
        if pending.first() == Some(&0x1b) && pending.len() == 1 {
            vec![Key::Escape]
        } else {
            Vec::new()
        }
    }

    /// Try to parse one key from the front of the pending buffer.
    ///
    /// `Some((key, used))` consumes `used` bytes (`key` may be `None`
    /// for bytes we recognize but ignore). `None` means the front is an
    /// incomplete escape sequence.
    fn parse_front(&self) -> Option<(Option<Key>, usize)> {
        let bytes = &self.pending;
        let &first = bytes.first()?;

        if first == 0x1b {
            return match bytes.get(1) {
                None => None, // Lone ESC so far — ambiguous, wait.
                Some(b'[') => match bytes.get(2) {
                    None => None,
                    Some(b'A') => Some((Some(Key::Up), 3)),
                    Some(b'B') => Some((Some(Key::Down), 3)),
                    Some(b'C') => Some((Some(Key::Right), 3)),
                    Some(b'D') => Some((Some(Key::Left), 3)),
                    // Unknown CSI — skip the introducer and final byte.
                    Some(_) => Some((None, 3)),
                },
                // ESC followed by anything else: deliver Escape, keep the rest.
                Some(_) => Some((Some(Key::Escape), 1)),
            };
        }

        match first {
            b'\r' | b'\n' => Some((Some(Key::Enter), 1)),
            0x20..=0x7e => Some((Some(Key::Char(first as char)), 1)),
            _ => {
                // Multi-byte UTF-8 start: decode if fully buffered.
                let len = utf8_len(first);
                if len > 1 {
                    if bytes.len() < len {
                        return None;
                    }
                    let ch = std::str::from_utf8(&bytes[..len])
                        .ok()
                        .and_then(|s| s.chars().next());
                    return Some((ch.map(Key::Char), len));
                }
                // Control byte we don't handle.
                Some((None, 1))
            }
        }
    }
}

/// Expected length of a UTF-8 sequence from its first byte (1 for
/// ASCII and invalid lead bytes).
const fn utf8_len(first: u8) -> usize {
    match first {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

// ─── StdinReader ────────────────────────────────────────────────────────────

/// How often the reader thread checks its stop flag (milliseconds).
const POLL_TIMEOUT_MS: i32 = 50;

/// Background stdin reader thread.
///
/// Reads raw bytes and sends them through a channel until stopped,
/// stdin hits EOF, or the receiver is dropped. Uses `poll()` with a
/// short timeout so shutdown never waits on a blocking `read()`.
pub struct StdinReader {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    /// Spawn the reader. Each received `Vec<u8>` is a non-empty chunk.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a thread.
    #[must_use]
    pub fn spawn() -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || reader_loop(&tx, &stop_flag))
            .expect("failed to spawn stdin reader thread");

        (
            Self {
                handle: Some(handle),
                stop,
            },
            rx,
        )
    }

    /// Signal the thread to stop and join it. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(unix)]
fn reader_loop(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::os::unix::io::AsRawFd;

    let stdin_fd = std::io::stdin().as_raw_fd();
    let mut buf = [0u8; 1024];

    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd: stdin_fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
        };
        if ready <= 0 {
            continue; // Timeout or error: recheck the stop flag.
        }

        let n = unsafe { libc::read(stdin_fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n <= 0 {
            break; // EOF or error.
        }

        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        if tx.send(buf[..n as usize].to_vec()).is_err() {
            break;
        }
    }
}

#[cfg(not(unix))]
fn reader_loop(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::io::Read;

    let stdin = std::io::stdin();
    let mut buf = [0u8; 1024];

    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        match stdin.lock().read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── Plain keys ──────────────────────────────────────────────────────

    #[test]
    fn parses_printables() {
        let mut p = Parser::new();
        assert_eq!(
            p.advance(b"qf "),
            vec![Key::Char('q'), Key::Char('f'), Key::Char(' ')]
        );
        assert!(!p.has_pending());
    }

    #[test]
    fn parses_enter() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\r"), vec![Key::Enter]);
        assert_eq!(p.advance(b"\n"), vec![Key::Enter]);
    }

    // ── Arrow keys ──────────────────────────────────────────────────────

    #[test]
    fn parses_arrows() {
        let mut p = Parser::new();
        assert_eq!(
            p.advance(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left]
        );
    }

    #[test]
    fn arrow_split_across_chunks() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.has_pending());
        assert!(p.advance(b"[").is_empty());
        assert_eq!(p.advance(b"C"), vec![Key::Right]);
        assert!(!p.has_pending());
    }

    // ── Escape disambiguation ───────────────────────────────────────────

    #[test]
    fn lone_esc_resolves_on_flush() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert_eq!(p.flush(), vec![Key::Escape]);
        assert!(!p.has_pending());
    }

    #[test]
    fn esc_then_printable_is_escape_plus_char() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\x1bq"), vec![Key::Escape, Key::Char('q')]);
    }

    #[test]
    fn unknown_csi_is_swallowed() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[Z").is_empty());
        assert!(!p.has_pending());
    }

    #[test]
    fn flush_when_empty_is_empty() {
        let mut p = Parser::new();
        assert!(p.flush().is_empty());
    }

    // ── UTF-8 ───────────────────────────────────────────────────────────

    #[test]
    fn parses_multibyte_char() {
        let mut p = Parser::new();
        assert_eq!(p.advance("é".as_bytes()), vec![Key::Char('é')]);
    }

    #[test]
    fn multibyte_split_across_chunks() {
        let mut p = Parser::new();
        let bytes = "★".as_bytes();
        assert!(p.advance(&bytes[..1]).is_empty());
        assert_eq!(p.advance(&bytes[1..]), vec![Key::Char('★')]);
    }

    // ── Reader lifecycle ────────────────────────────────────────────────

    #[test]
    fn spawn_and_stop() {
        let (mut reader, _rx) = StdinReader::spawn();
        reader.stop();
        reader.stop(); // Idempotent.
    }

    #[test]
    fn drop_stops_reader() {
        let (reader, _rx) = StdinReader::spawn();
        drop(reader); // Must not hang.
    }
}
