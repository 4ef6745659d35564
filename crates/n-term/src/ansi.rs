// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit; that's the `Screen`'s job. This module
// just knows the byte-level encoding of every terminal command an inline
// prompt needs: cursor visibility, relative cursor motion, erasing below
// the cursor, bracketed paste and SGR styling.
//
// Everything here is relative to the cursor. An inline prompt never knows
// its absolute row (it lives wherever the shell prompt left the cursor),
// so there is no CUP here on purpose.
use std::io::{self, Write};

use crate::style::{Attr, Color};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Move the cursor up `n` lines (CUU). Emits nothing for `n == 0`.
///
/// CUU with a zero parameter means "one" to the terminal, so the zero case
/// must be filtered here rather than passed through.
#[inline]
pub fn cursor_up(w: &mut impl Write, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}A")
}

/// Move the cursor to column `x` of the current line (CHA, 0-indexed).
#[inline]
pub fn cursor_column(w: &mut impl Write, x: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", x + 1)
}

// ─── Erase ───────────────────────────────────────────────────────────────────

/// Erase from the cursor to the end of the screen (ED 0).
#[inline]
pub fn erase_down(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[J")
}

// ─── Modes ───────────────────────────────────────────────────────────────────

/// Enable bracketed paste mode (DEC 2004).
///
/// Pasted text then arrives wrapped in `ESC[200~ ... ESC[201~`, so a pasted
/// line break is text, not Enter.
#[inline]
pub fn enable_bracketed_paste(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2004h")
}

/// Disable bracketed paste mode.
#[inline]
pub fn disable_bracketed_paste(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2004l")
}

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97) and the
/// 256-color extended format for palette indices 16-255.
pub fn fg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(b"\x1b[39m"),
        Color::Ansi(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
    }
}

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;4m` for
/// bold + underline. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    w.write_all(b";")?;
                }
                w.write_all($code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, b"1");
    emit!(Attr::DIM, b"2");
    emit!(Attr::ITALIC, b"3");
    emit!(Attr::UNDERLINE, b"4");
    emit!(Attr::INVERSE, b"7");
    let _ = first; // Last expansion sets first; suppress dead-write warning.

    w.write_all(b"m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn cursor_up_zero_is_empty() {
        assert_eq!(emit(|w| cursor_up(w, 0)), "");
    }

    #[test]
    fn cursor_up_n() {
        assert_eq!(emit(|w| cursor_up(w, 3)), "\x1b[3A");
    }

    #[test]
    fn cursor_column_is_one_indexed() {
        assert_eq!(emit(|w| cursor_column(w, 0)), "\x1b[1G");
        assert_eq!(emit(|w| cursor_column(w, 9)), "\x1b[10G");
    }

    // ── Erase ───────────────────────────────────────────────────────────

    #[test]
    fn erase_down_sequence() {
        assert_eq!(emit(|w| erase_down(w)), "\x1b[J");
    }

    // ── Modes ───────────────────────────────────────────────────────────

    #[test]
    fn bracketed_paste_sequences() {
        assert_eq!(emit(|w| enable_bracketed_paste(w)), "\x1b[?2004h");
        assert_eq!(emit(|w| disable_bracketed_paste(w)), "\x1b[?2004l");
    }

    // ── SGR ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn fg_default() {
        assert_eq!(emit(|w| fg(w, Color::Default)), "\x1b[39m");
    }

    #[test]
    fn fg_standard_and_bright() {
        assert_eq!(emit(|w| fg(w, Color::RED)), "\x1b[31m");
        assert_eq!(emit(|w| fg(w, Color::CYAN)), "\x1b[36m");
        assert_eq!(emit(|w| fg(w, Color::Ansi(9))), "\x1b[91m");
    }

    #[test]
    fn fg_palette_index() {
        assert_eq!(emit(|w| fg(w, Color::Ansi(208))), "\x1b[38;5;208m");
    }

    #[test]
    fn attrs_empty_emits_nothing() {
        assert_eq!(emit(|w| attrs(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_combined() {
        assert_eq!(emit(|w| attrs(w, Attr::BOLD | Attr::UNDERLINE)), "\x1b[1;4m");
        assert_eq!(emit(|w| attrs(w, Attr::DIM)), "\x1b[2m");
    }
}
