// SPDX-License-Identifier: MIT
//! Cursor and cell storage.
//!
//! The grid's shape is fixed when the controller is built, so storage is a
//! dense row-major `Vec<String>` of exactly `rows × columns` cells. An unset
//! cell is simply the empty string; there is no "absent" state to check.
//!
//! # Edge policy
//!
//! The two axes behave differently at their edges:
//!
//! | Axis    | At the edge        | Shape                                    |
//! |---------|--------------------|------------------------------------------|
//! | rows    | clamp, no wrap     | long, paginated; a wrap would jump pages |
//! | columns | wrap around        | short, always fully visible              |

/// The focused cell. Always inside the grid it was moved within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
}

impl Cursor {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { row: 0, column: 0 };

    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    // -- Rows: clamp --------------------------------------------------------

    /// One row up, staying on row 0 at the top.
    pub const fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    /// One row down, staying on the last row at the bottom.
    pub const fn move_down(&mut self, row_count: usize) {
        if self.row + 1 < row_count {
            self.row += 1;
        }
    }

    // -- Columns: wrap ------------------------------------------------------

    /// One column left, wrapping from the first column to the last.
    pub const fn move_left(&mut self, column_count: usize) {
        self.column = if self.column > 0 {
            self.column - 1
        } else {
            column_count.saturating_sub(1)
        };
    }

    /// One column right, wrapping from the last column to the first.
    pub const fn move_right(&mut self, column_count: usize) {
        self.column = if self.column + 1 < column_count {
            self.column + 1
        } else {
            0
        };
    }
}

/// Text per cell, dense and row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGrid {
    rows: usize,
    columns: usize,
    cells: Vec<String>,
}

impl ValueGrid {
    /// An all-empty grid of the given shape.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![String::new(); rows * columns],
        }
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    const fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows && column < self.columns);
        row * self.columns + column
    }

    /// Text at a cell; `""` if never edited.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> &str {
        &self.cells[self.index(row, column)]
    }

    /// Text under the cursor.
    #[must_use]
    pub fn at(&self, cursor: Cursor) -> &str {
        self.get(cursor.row, cursor.column)
    }

    /// Append `ch` to the cell under the cursor.
    pub fn push(&mut self, cursor: Cursor, ch: char) {
        let i = self.index(cursor.row, cursor.column);
        self.cells[i].push(ch);
    }

    /// Remove the last character of the cell under the cursor.
    ///
    /// Returns the removed character, or `None` (and changes nothing) when
    /// the cell is empty.
    pub fn pop(&mut self, cursor: Cursor) -> Option<char> {
        let i = self.index(cursor.row, cursor.column);
        self.cells[i].pop()
    }

    /// Whether every cell is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- Cursor -------------------------------------------------------------

    #[test]
    fn up_clamps_at_top() {
        let mut c = Cursor::ORIGIN;
        c.move_up();
        assert_eq!(c, Cursor::ORIGIN);
    }

    #[test]
    fn down_clamps_at_bottom() {
        let mut c = Cursor::new(2, 0);
        c.move_down(3);
        assert_eq!(c.row, 2);
        c.move_up();
        c.move_down(3);
        assert_eq!(c.row, 2);
    }

    #[test]
    fn left_wraps_to_last_column() {
        let mut c = Cursor::ORIGIN;
        c.move_left(4);
        assert_eq!(c.column, 3);
    }

    #[test]
    fn right_wraps_to_first_column() {
        let mut c = Cursor::new(0, 3);
        c.move_right(4);
        assert_eq!(c.column, 0);
    }

    #[test]
    fn single_column_stays_put() {
        let mut c = Cursor::ORIGIN;
        c.move_left(1);
        assert_eq!(c.column, 0);
        c.move_right(1);
        assert_eq!(c.column, 0);
    }

    // -- ValueGrid ----------------------------------------------------------

    #[test]
    fn starts_blank() {
        let g = ValueGrid::new(2, 3);
        assert!(g.is_blank());
        assert_eq!(g.get(1, 2), "");
        assert_eq!((g.rows(), g.columns()), (2, 3));
    }

    #[test]
    fn push_and_pop_touch_only_the_cursor_cell() {
        let mut g = ValueGrid::new(2, 2);
        let c = Cursor::new(1, 0);
        g.push(c, 'h');
        g.push(c, 'i');
        assert_eq!(g.at(c), "hi");
        assert_eq!(g.get(0, 0), "");
        assert_eq!(g.get(1, 1), "");
        assert_eq!(g.pop(c), Some('i'));
        assert_eq!(g.at(c), "h");
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut g = ValueGrid::new(1, 1);
        assert_eq!(g.pop(Cursor::ORIGIN), None);
        assert!(g.is_blank());
    }

    #[test]
    fn pop_removes_whole_multibyte_char() {
        let mut g = ValueGrid::new(1, 1);
        g.push(Cursor::ORIGIN, 'a');
        g.push(Cursor::ORIGIN, '日');
        assert_eq!(g.pop(Cursor::ORIGIN), Some('日'));
        assert_eq!(g.at(Cursor::ORIGIN), "a");
    }

    // -- Properties ---------------------------------------------------------

    #[derive(Debug, Clone, Copy)]
    enum Move {
        Up,
        Down,
        Left,
        Right,
    }

    fn moves() -> impl Strategy<Value = Vec<Move>> {
        prop::collection::vec(
            prop_oneof![
                Just(Move::Up),
                Just(Move::Down),
                Just(Move::Left),
                Just(Move::Right),
            ],
            0..200,
        )
    }

    proptest! {
        #[test]
        fn cursor_never_leaves_the_grid(rows in 1usize..30, cols in 1usize..10, seq in moves()) {
            let mut c = Cursor::ORIGIN;
            for m in seq {
                match m {
                    Move::Up => c.move_up(),
                    Move::Down => c.move_down(rows),
                    Move::Left => c.move_left(cols),
                    Move::Right => c.move_right(cols),
                }
                prop_assert!(c.row < rows);
                prop_assert!(c.column < cols);
            }
        }

        #[test]
        fn columns_are_cyclic(cols in 1usize..10, start in 0usize..10, n in 0usize..50) {
            let start = start % cols;
            let mut right = Cursor::new(0, start);
            let mut left = Cursor::new(0, start);
            for _ in 0..n {
                right.move_right(cols);
                left.move_left(cols);
            }
            prop_assert_eq!(right.column, (start + n) % cols);
            prop_assert_eq!(left.column, (start + cols * n - n) % cols);
        }

        #[test]
        fn edits_match_a_plain_string_buffer(
            ops in prop::collection::vec(prop::option::of(any::<char>()), 0..100)
        ) {
            // Some(ch) = type ch, None = backspace.
            let mut g = ValueGrid::new(1, 1);
            let mut model = String::new();
            for op in ops {
                match op {
                    Some(ch) => {
                        g.push(Cursor::ORIGIN, ch);
                        model.push(ch);
                    }
                    None => {
                        g.pop(Cursor::ORIGIN);
                        model.pop();
                    }
                }
            }
            prop_assert_eq!(g.at(Cursor::ORIGIN), model.as_str());
        }
    }
}
