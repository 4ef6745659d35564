// SPDX-License-Identifier: MIT
//
// Terminal keyboard parser.
//
// Turns raw stdin bytes into structured key events. A prompt only needs the
// keyboard, so this parser covers exactly what a line-oriented terminal in
// raw mode sends for typing and navigation:
//
// - ASCII printable characters and UTF-8 multi-byte characters
// - Control characters (Ctrl+letter, Enter, Tab, Backspace)
// - Legacy CSI sequences (arrows, Home/End, editing keys, with xterm
//   modifier parameters like `ESC [ 1 ; 5 A` for Ctrl+Up)
// - SS3 sequences (arrows in application cursor mode)
// - Bracketed paste (delivered as one event)
// - Alt+key (ESC followed by a printable character)
//
// Mouse reports are never requested by the prompt, so they are not parsed;
// any CSI sequence with an unknown final byte is consumed and dropped.
//
// # Design
//
// The parser keeps a small byte buffer because escape sequences can span
// multiple `read()` calls. Feed bytes with [`Parser::advance`], and after a
// timeout with no new bytes call [`Parser::flush`] to emit a pending lone
// ESC as a real Escape keypress.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Bracketed paste content, delivered whole.
    Paste(String),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Whether Ctrl is held and `ch` is the key, e.g. `is_ctrl('c')`.
    #[must_use]
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.modifiers.contains(Modifiers::CTRL) && self.code == KeyCode::Char(ch)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character.
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Matches the xterm CSI modifier encoding where `param = 1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Bracketed paste opening delimiter: `ESC [ 200 ~`
const PASTE_START: &[u8] = b"\x1b[200~";
/// Bracketed paste closing delimiter: `ESC [ 201 ~`
const PASTE_END: &[u8] = b"\x1b[201~";

/// Terminal keyboard parser.
///
/// Feed raw bytes via [`advance`](Parser::advance) and collect [`Event`]s.
/// Incomplete sequences stay buffered until more bytes arrive or
/// [`flush`](Parser::flush) is called.
#[derive(Debug)]
pub struct Parser {
    /// Accumulated raw bytes waiting to be parsed.
    buf: Vec<u8>,
    /// Inside a bracketed paste, accumulating until the closing delimiter.
    in_paste: bool,
}

impl Parser {
    /// Create a new parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
            in_paste: false,
        }
    }

    /// Feed raw bytes and return every event that can be parsed so far.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            let remaining = &self.buf[pos..];

            if self.in_paste {
                let Some(end) = find_subsequence(remaining, PASTE_END) else {
                    break;
                };
                let text = String::from_utf8_lossy(&remaining[..end]).into_owned();
                events.push(Event::Paste(text));
                pos += end + PASTE_END.len();
                self.in_paste = false;
                continue;
            }

            if remaining.starts_with(PASTE_START) {
                self.in_paste = true;
                pos += PASTE_START.len();
                continue;
            }
            // A partial paste opener: wait rather than misparse it as CSI 2.
            if remaining.len() < PASTE_START.len()
                && remaining.len() > 2
                && PASTE_START.starts_with(remaining)
            {
                break;
            }

            match try_parse(remaining) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }
        events
    }

    /// Are there unconsumed bytes that might complete with more data?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush pending bytes as literal key events.
    ///
    /// A lone ESC becomes an Escape key; printable leftovers become `Char`.
    /// An unterminated paste is delivered as whatever arrived.
    pub fn flush(&mut self) -> Vec<Event> {
        if self.in_paste {
            self.in_paste = false;
            let text = String::from_utf8_lossy(&self.buf).into_owned();
            self.buf.clear();
            return vec![Event::Paste(text)];
        }

        let mut events = Vec::new();
        for &byte in &self.buf {
            let event = match byte {
                0x1B => press(KeyCode::Escape),
                0x7F => press(KeyCode::Backspace),
                b @ 0x20..=0x7E => press(KeyCode::Char(b as char)),
                _ => continue,
            };
            events.push(event);
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────

/// Result of trying to parse one event from the front of a buffer.
enum Parsed {
    /// Parsed an event, consuming `usize` bytes.
    Event(Event, usize),
    /// Sequence is incomplete; need more bytes.
    Incomplete,
    /// Unrecognized byte(s), skip `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&lead) = buf.first() else {
        return Parsed::Skip(0);
    };

    match lead {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Event(ctrl_key('@'), 1),
        0x08 | 0x7F => Parsed::Event(press(KeyCode::Backspace), 1),
        0x09 => Parsed::Event(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Event(press(KeyCode::Enter), 1),
        b @ 0x01..=0x1A => Parsed::Event(ctrl_key((b + b'a' - 1) as char), 1),
        0x1C..=0x1F => Parsed::Skip(1),
        b @ 0x20..=0x7E => Parsed::Event(press(KeyCode::Char(b as char)), 1),
        0xC0..=0xFF => parse_utf8(buf),
        // Bare continuation bytes (0x80..=0xBF) are an invalid lead.
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    debug_assert_eq!(buf[0], 0x1B);

    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => Parsed::Event(
            key_with(KeyCode::Char(b as char), Modifiers::ALT),
            2,
        ),
        // ESC followed by something else: the ESC stands alone.
        _ => Parsed::Event(press(KeyCode::Escape), 1),
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    // Scan for the final byte (0x40..=0x7E). Parameter bytes are
    // 0x30..=0x3F, intermediates 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match final_byte {
        b'~' => match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            _ => return Parsed::Skip(consumed),
        },
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'Z' => KeyCode::BackTab,
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Event(key_with(code, modifiers), consumed)
}

// ── SS3 (Single Shift 3) ───────────────────────────────────────────────────

fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        _ => return Parsed::Skip(3),
    };

    Parsed::Event(press(code), 3)
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            Parsed::Event(press(KeyCode::Char(ch)), expected)
        })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn press(code: KeyCode) -> Event {
    key_with(code, Modifiers::empty())
}

const fn ctrl_key(ch: char) -> Event {
    key_with(KeyCode::Char(ch), Modifiers::CTRL)
}

const fn key_with(code: KeyCode, modifiers: Modifiers) -> Event {
    Event::Key(KeyEvent { code, modifiers })
}

/// Parse semicolon-separated numeric CSI parameters.
///
/// Empty fields parse as 0: `;5` → `[0, 5]`. Colon sub-parameters and
/// private markers are ignored.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Decode an xterm modifier parameter (`1 + bitmask`) into `Modifiers`.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid lead bytes.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
