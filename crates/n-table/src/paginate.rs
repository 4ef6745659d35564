// SPDX-License-Identifier: MIT
//! Which rows are visible.
//!
//! The visible window follows the cursor row: it is centered on it where it
//! can be, pinned to the top near the first row, and shifted up near the
//! last row so the window stays full instead of shrinking.

use std::fmt;

/// An inclusive range of visible row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first: usize,
    pub last: usize,
}

impl PageWindow {
    /// Number of visible rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Never true: a window always shows at least one row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn contains(&self, row: usize) -> bool {
        self.first <= row && row <= self.last
    }

    /// The window summary shown in the table corner, e.g. `"1-5 of 12"`.
    #[must_use]
    pub fn summary(&self, total: usize) -> String {
        format!("{}-{} of {total}", self.first + 1, self.last + 1)
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}

/// Compute the window for cursor row `row` over `total` rows.
///
/// `page_size` and `total` must be at least 1 and `row < total`; the
/// controller guarantees all three.
#[must_use]
pub fn paginate(page_size: usize, row: usize, total: usize) -> PageWindow {
    debug_assert!(page_size >= 1 && total >= 1 && row < total);

    let mid = page_size / 2;
    let first = row.saturating_sub(mid);
    let last = (first + page_size - 1).min(total - 1);
    // How far short of a full page the window fell at the bottom edge.
    let shortfall = (page_size - 1) - (last - first);
    PageWindow {
        first: first.saturating_sub(shortfall),
        last,
    }
}
