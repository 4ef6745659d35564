// SPDX-License-Identifier: MIT
//
// Inline redraw region.
//
// A prompt does not take over the screen. It draws a block of lines where
// the shell left the cursor, and every redraw must replace that block in
// place: move back up to its first row, erase everything below, write the
// new frame. The block has two parts:
//
//   ┌──────────────────────────────┐
//   │ main content (question,      │  ← cursor parks at the end of this
//   │ instructions, table)         │
//   ├──────────────────────────────┤
//   │ bottom content (error line)  │  ← optional
//   └──────────────────────────────┘
//
// Bookkeeping is in terminal rows, not logical lines: a line wider than the
// terminal soft-wraps onto extra rows, and those rows must be erased too.
// Each frame is assembled in memory and written with one `write_all`, so
// the terminal never shows a half-erased block.

use std::io::{self, Write};

use crate::ansi;
use crate::terminal::{self, Size};
use crate::width::{display_width, wrapped_rows};

/// An inline, redrawable block of terminal lines.
///
/// Generic over the writer so frames can be captured in tests.
pub struct Screen<W: Write> {
    out: W,
    /// Fixed width, or `None` to query the terminal on every render.
    width: Option<u16>,
    /// Rows from the top of the drawn block down to the cursor's row.
    cursor_row: usize,
    /// Total rows of the drawn block (main + bottom).
    height: usize,
    /// Whether a block is currently on screen.
    drawn: bool,
}

impl Screen<io::Stderr> {
    /// A screen on stderr, sized from the terminal. Stdout stays clean for
    /// the program's own output.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr(), None)
    }
}

impl<W: Write> Screen<W> {
    /// Create a screen writing to `out`. With `width = None` the terminal
    /// is queried on every render so resizes are picked up.
    pub const fn new(out: W, width: Option<u16>) -> Self {
        Self {
            out,
            width,
            cursor_row: 0,
            height: 0,
            drawn: false,
        }
    }

    /// The writer, for inspecting captured output.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    fn cols(&self) -> u16 {
        self.width
            .or_else(|| terminal::get_size().map(|s| s.cols))
            .unwrap_or(Size::FALLBACK.cols)
    }

    /// Replace the block on screen with `main` and, when non-empty, `bottom`.
    ///
    /// The cursor is hidden on the first render and stays hidden until
    /// [`done`](Self::done).
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn render(&mut self, main: &str, bottom: &str) -> io::Result<()> {
        let cols = self.cols();
        let mut frame = Vec::with_capacity(main.len() + bottom.len() + 32);

        if self.drawn {
            self.clean(&mut frame)?;
        } else {
            ansi::cursor_hide(&mut frame)?;
        }

        // Embedded newlines are output as-is; the terminal's output
        // processing turns them into CR LF.
        frame.extend_from_slice(main.as_bytes());
        let main_rows = rows_of(main, cols);
        let last_line = main.rsplit('\n').next().unwrap_or("");
        let mut height = main_rows;

        if !bottom.is_empty() {
            frame.push(b'\n');
            frame.extend_from_slice(bottom.as_bytes());
            let bottom_rows = rows_of(bottom, cols);
            height += bottom_rows;
            // Park the cursor back at the end of the main block.
            ansi::cursor_up(&mut frame, u16::try_from(bottom_rows).unwrap_or(u16::MAX))?;
            let col = display_width(last_line) % usize::from(cols.max(1));
            ansi::cursor_column(&mut frame, u16::try_from(col).unwrap_or(0))?;
        }

        self.out.write_all(&frame)?;
        self.out.flush()?;

        self.cursor_row = main_rows - 1;
        self.height = height;
        self.drawn = true;
        Ok(())
    }

    /// Finish the block: move below it, start a fresh line, show the cursor.
    ///
    /// The last frame stays on screen. Idempotent once finished.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn done(&mut self) -> io::Result<()> {
        if !self.drawn {
            return Ok(());
        }
        let mut tail = Vec::new();
        for _ in self.cursor_row..self.height {
            tail.push(b'\n');
        }
        ansi::cursor_show(&mut tail)?;
        self.out.write_all(&tail)?;
        self.out.flush()?;

        self.drawn = false;
        self.cursor_row = 0;
        self.height = 0;
        Ok(())
    }

    /// Erase the block currently on screen, leaving the cursor at its top-left.
    fn clean(&self, frame: &mut Vec<u8>) -> io::Result<()> {
        ansi::cursor_up(frame, u16::try_from(self.cursor_row).unwrap_or(u16::MAX))?;
        ansi::cursor_column(frame, 0)?;
        ansi::erase_down(frame)
    }
}

/// Terminal rows taken by multi-line `text` at `cols` columns.
fn rows_of(text: &str, cols: u16) -> usize {
    text.split('\n').map(|line| wrapped_rows(line, cols)).sum()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
