// SPDX-License-Identifier: MIT
//
// Box-drawn tables.
//
// Turns a header row and body rows of (possibly painted) strings into
// aligned text:
//
//   ┌──────────┬─────┬─────┐
//   │ 1-3 of 3 │ C1  │ C2  │
//   ├──────────┼─────┼─────┤
//   │ R1       │ [ ] │     │
//   ├──────────┼─────┼─────┤
//   │ R2       │     │     │
//   └──────────┴─────┴─────┘
//
// Column widths are measured in terminal columns with escape sequences
// ignored, so cells can carry color. Callers that want a different look
// implement `TableFormatter` themselves.

use crate::width::{display_width, pad_right};

/// Formats a header row plus body rows into multi-line text.
pub trait TableFormatter {
    /// Lay out `head` and `rows` into lines joined by `\n`, without a
    /// trailing newline. Rows may be ragged; missing cells render empty.
    fn format(&self, head: &[String], rows: &[Vec<String>]) -> String;
}

/// Single-line box drawing with one space of padding on each side of a cell
/// and a separator line between body rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxTable {
    /// Spaces on each side of cell content.
    pub padding: usize,
}

impl BoxTable {
    /// The usual look: one space of padding.
    #[must_use]
    pub const fn new() -> Self {
        Self { padding: 1 }
    }
}

/// Box-drawing characters for one horizontal rule: (left, junction, right).
const TOP: (char, char, char) = ('┌', '┬', '┐');
const MID: (char, char, char) = ('├', '┼', '┤');
const BOTTOM: (char, char, char) = ('└', '┴', '┘');

impl TableFormatter for BoxTable {
    fn format(&self, head: &[String], rows: &[Vec<String>]) -> String {
        let ncols = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(head.len()))
            .max()
            .unwrap_or(0);
        if ncols == 0 {
            return String::new();
        }

        let mut widths = vec![0usize; ncols];
        for row in std::iter::once(head).chain(rows.iter().map(Vec::as_slice)) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(display_width(cell));
            }
        }
        let inner: Vec<usize> = widths.iter().map(|w| w + 2 * self.padding).collect();

        let mut lines = Vec::with_capacity(rows.len() * 2 + 3);
        lines.push(rule(&inner, TOP));
        if !head.is_empty() {
            lines.push(self.line(head, &widths));
            lines.push(rule(&inner, MID));
        }
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                lines.push(rule(&inner, MID));
            }
            lines.push(self.line(row, &widths));
        }
        lines.push(rule(&inner, BOTTOM));
        lines.join("\n")
    }
}

impl BoxTable {
    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let pad = " ".repeat(self.padding);
        let mut out = String::from('│');
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map_or("", String::as_str);
            out.push_str(&pad);
            out.push_str(&pad_right(cell, *w));
            out.push_str(&pad);
            out.push('│');
        }
        out
    }
}

fn rule(inner: &[usize], (left, junction, right): (char, char, char)) -> String {
    let mut out = String::from(left);
    for (i, w) in inner.iter().enumerate() {
        if i > 0 {
            out.push(junction);
        }
        out.extend(std::iter::repeat_n('─', *w));
    }
    out.push(right);
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn header_and_rows() {
        let head = strings(&["#", "A", "Bee"]);
        let rows = vec![strings(&["r1", "x", ""]), strings(&["row2", "", "yy"])];
        let out = BoxTable::new().format(&head, &rows);
        let expected = "\
┌──────┬───┬─────┐
│ #    │ A │ Bee │
├──────┼───┼─────┤
│ r1   │ x │     │
├──────┼───┼─────┤
│ row2 │   │ yy  │
└──────┴───┴─────┘";
        assert_eq!(out, expected);
    }

    #[test]
    fn painted_cells_align_by_visible_width() {
        let head = vec!["\x1b[1mH\x1b[0m".to_string()];
        let rows = vec![strings(&["abc"])];
        let out = BoxTable::new().format(&head, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "┌─────┐");
        assert_eq!(lines[1], "│ \x1b[1mH\x1b[0m   │");
        assert_eq!(lines[3], "│ abc │");
    }

    #[test]
    fn ragged_rows_fill_empty() {
        let head = strings(&["a", "b"]);
        let rows = vec![strings(&["1"])];
        let out = BoxTable::new().format(&head, &rows);
        assert!(out.contains("│ 1 │   │"), "{out}");
    }

    #[test]
    fn empty_table_is_empty_string() {
        assert_eq!(BoxTable::new().format(&[], &[]), "");
    }

    #[test]
    fn zero_padding() {
        let out = BoxTable { padding: 0 }.format(&strings(&["ab"]), &[]);
        assert_eq!(out, "┌──┐\n│ab│\n├──┤\n└──┘");
    }
}
