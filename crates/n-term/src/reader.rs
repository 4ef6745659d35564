// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Key reader: blocking, ordered key events from stdin.
//
// A dedicated thread reads stdin and sends raw byte chunks through a
// standard channel. The consuming side owns the `Parser` and hands out one
// event at a time, in arrival order, from `next_event()`.
//
// Why a thread if the consumer blocks anyway? The ESC ambiguity. A lone
// ESC byte is either the Escape key or the start of a sequence, and the
// only way to tell is to wait a little for more bytes. `recv_timeout()` on
// the channel gives us that wait for free; a bare blocking `read()` does not.
//
// Shutdown: the reader thread uses `poll()` with a short timeout on stdin's
// file descriptor, checking an `AtomicBool` stop flag between polls, so it
// never stays stuck in a blocking `read()` after the prompt is finished.

use std::collections::VecDeque;
#[cfg(unix)]
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::input::{Event, Parser};

/// Byte chunk read from stdin. A keypress is 1-6 bytes, a paste can be
/// kilobytes; 4 KB handles both.
const READ_BUF_SIZE: usize = 4096;

/// How often the reader thread checks the stop flag (milliseconds).
const POLL_TIMEOUT_MS: i32 = 50;

/// How long a lone ESC waits for the rest of a sequence.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(25);

/// Ordered key events from a byte source, one at a time.
///
/// Built either on a background stdin thread ([`spawn`](Self::spawn)) or on
/// any channel of byte chunks ([`from_channel`](Self::from_channel)).
///
/// # Example
///
/// ```no_run
/// use n_term::reader::KeyReader;
///
/// let mut keys = KeyReader::spawn();
/// while let Some(event) = keys.next_event() {
///     println!("{event:?}");
/// }
/// // Reader thread stops when `keys` is dropped.
/// ```
pub struct KeyReader {
    /// The reader thread handle. `None` for channel-fed readers and after `stop()`.
    handle: Option<JoinHandle<()>>,
    /// Shared flag to signal the thread to exit.
    stop: Arc<AtomicBool>,
    rx: Receiver<Vec<u8>>,
    parser: Parser,
    /// Parsed events not yet handed out.
    queue: VecDeque<Event>,
    escape_timeout: Duration,
}

impl KeyReader {
    /// Spawn the background stdin thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a new thread (extremely rare).
    #[must_use]
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || read_stdin(&tx, &stop_flag))
            .expect("failed to spawn stdin reader thread");

        let mut reader = Self::from_channel(rx);
        reader.handle = Some(handle);
        reader.stop = stop;
        reader
    }

    /// Read from an existing channel of byte chunks. No thread is spawned.
    #[must_use]
    pub fn from_channel(rx: Receiver<Vec<u8>>) -> Self {
        Self {
            handle: None,
            stop: Arc::new(AtomicBool::new(false)),
            rx,
            parser: Parser::new(),
            queue: VecDeque::new(),
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
        }
    }

    /// Builder: change how long a lone ESC waits for more bytes.
    #[must_use]
    pub const fn with_escape_timeout(mut self, timeout: Duration) -> Self {
        self.escape_timeout = timeout;
        self
    }

    /// Block until the next event arrives.
    ///
    /// Returns `None` once the byte source is closed (stdin EOF, or the
    /// sending half of the channel dropped) and every buffered event has
    /// been handed out.
    pub fn next_event(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }

            let received = if self.parser.has_pending() {
                self.rx.recv_timeout(self.escape_timeout)
            } else {
                self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
            };

            match received {
                Ok(bytes) => self.queue.extend(self.parser.advance(&bytes)),
                Err(RecvTimeoutError::Timeout) => self.queue.extend(self.parser.flush()),
                Err(RecvTimeoutError::Disconnected) => {
                    self.queue.extend(self.parser.flush());
                    if self.queue.is_empty() {
                        return None;
                    }
                }
            }
        }
    }

    /// Signal the reader thread to stop and wait for it to exit.
    ///
    /// Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The reader thread's main loop.
///
/// Polls stdin with a short timeout, reads available bytes, and sends them
/// through the channel. Exits when the stop flag is set, stdin reaches EOF,
/// or the receiving side is gone.
#[cfg(unix)]
fn read_stdin(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::os::unix::io::AsRawFd;

    let stdin_fd = io::stdin().as_raw_fd();
    let mut buf = [0u8; READ_BUF_SIZE];

    while !stop.load(Ordering::Relaxed) {
        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd: stdin_fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
        };
        if ready <= 0 {
            continue;
        }

        let n = unsafe { libc::read(stdin_fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n <= 0 {
            break;
        }

        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        let chunk = buf[..n as usize].to_vec();
        if tx.send(chunk).is_err() {
            break;
        }
    }
}

/// Non-unix fallback: blocking reads, so shutdown waits for the next key.
#[cfg(not(unix))]
fn read_stdin(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::io::Read;

    let stdin = std::io::stdin();
    let mut buf = [0u8; READ_BUF_SIZE];

    while !stop.load(Ordering::Relaxed) {
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

// ─── Tests ───────────────────────────────────────────────────────────────────
