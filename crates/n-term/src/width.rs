// SPDX-License-Identifier: MIT
//
// Display width of painted text.
//
// Table layout and redraw bookkeeping both need to know how many terminal
// columns a string occupies. Two things get in the way of `str::len()`:
// SGR escape sequences (zero columns) and wide characters (two columns).
// This module walks grapheme clusters, skips CSI sequences, and asks
// `unicode-width` for the rest.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Strip CSI escape sequences (`ESC [ ... final`) from `s`.
///
/// Only CSI is recognized; that is all [`Style`](crate::style::Style)
/// ever emits.
#[must_use]
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameter and intermediate bytes, then one final byte 0x40..=0x7E.
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

/// Number of terminal columns `s` occupies, ignoring escape sequences.
#[must_use]
pub fn display_width(s: &str) -> usize {
    if s.contains('\x1b') {
        strip_ansi(s).width()
    } else {
        s.width()
    }
}

/// Right-pad `s` with spaces to `width` columns.
///
/// Strings already at or past `width` are returned unchanged.
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(w));
    out.push_str(s);
    for _ in w..width {
        out.push(' ');
    }
    out
}

/// Number of terminal rows one logical line takes at `cols` columns.
///
/// The terminal soft-wraps long lines. A wide character that does not fit
/// in the last column moves to the next row whole, so this walks grapheme
/// clusters rather than dividing the total width. An empty line still
/// takes one row.
#[must_use]
pub fn wrapped_rows(line: &str, cols: u16) -> usize {
    let cols = usize::from(cols.max(1));
    let plain = strip_ansi(line);
    let mut rows = 1;
    let mut x = 0;
    for g in plain.graphemes(true) {
        let w = g.width();
        if w == 0 {
            continue;
        }
        if x + w > cols {
            rows += 1;
            x = 0;
        }
        x += w;
    }
    rows
}

// ─── Tests ───────────────────────────────────────────────────────────────────
