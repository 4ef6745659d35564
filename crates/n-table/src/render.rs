// SPDX-License-Identifier: MIT
//! Turning controller state into text.
//!
//! A [`Frame`] is everything one redraw puts on screen: the main block
//! (question, key hints, table) and an optional bottom line for the
//! validation message. Rendering is a pure function of the controller; the
//! sink decides how the frame reaches the terminal.
//!
//! ```text
//! ? Scores (Press <enter> to submit, <Up and Down> to move rows, ...)
//!
//! ┌──────────┬───────┬──────┐
//! │ 1-3 of 3 │ C1    │ C2   │
//! ├──────────┼───────┼──────┤
//! │ R1       │ [ 9 ] │      │
//! ├──────────┼───────┼──────┤
//! ...
//! >> R2 / C1 is empty; every cell is required
//! ```

use n_term::style::{self, Attr, Color, Style};
use n_term::table::{BoxTable, TableFormatter};

use crate::controller::GridController;

/// One redraw's worth of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Question, hints and table. The cursor parks at its end.
    pub main: String,
    /// Error line, or empty.
    pub bottom: String,
}

// -- Theme ------------------------------------------------------------------

/// Styles for every painted part of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub prefix: String,
    pub prefix_style: Style,
    pub question: Style,
    pub key_hint: Style,
    pub page_summary: Style,
    pub column: Style,
    pub current_column: Style,
    pub row_label: Style,
    pub current_row: Style,
    pub error_prefix: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let highlight = Style::plain().attr(Attr::BOLD).fg(Color::CYAN);
        Self {
            prefix: "?".to_string(),
            prefix_style: Style::plain().fg(Color::GREEN),
            question: Style::plain().attr(Attr::BOLD),
            key_hint: highlight,
            page_summary: Style::plain().attr(Attr::DIM),
            column: Style::plain().attr(Attr::BOLD),
            current_column: highlight,
            row_label: Style::plain(),
            current_row: highlight,
            error_prefix: Style::plain().fg(Color::RED),
        }
    }
}

impl Theme {
    /// Same layout, no escape sequences.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            prefix: "?".to_string(),
            prefix_style: Style::plain(),
            question: Style::plain(),
            key_hint: Style::plain(),
            page_summary: Style::plain(),
            column: Style::plain(),
            current_column: Style::plain(),
            row_label: Style::plain(),
            current_row: Style::plain(),
            error_prefix: Style::plain(),
        }
    }

    /// The default theme, or [`plain`](Self::plain) when `NO_COLOR` is set.
    #[must_use]
    pub fn for_terminal() -> Self {
        if style::color_enabled() {
            Self::default()
        } else {
            Self::plain()
        }
    }
}

// -- Renderer ---------------------------------------------------------------

/// Renders controller state with a theme and a table layout.
#[derive(Debug, Clone)]
pub struct Renderer<T: TableFormatter = BoxTable> {
    theme: Theme,
    table: T,
}

impl Renderer {
    /// Box-drawn tables in `theme`.
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self {
            theme,
            table: BoxTable::new(),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl<T: TableFormatter> Renderer<T> {
    /// Lay tables out with `table` instead.
    pub const fn with_table(theme: Theme, table: T) -> Self {
        Self { theme, table }
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render the current state.
    #[must_use]
    pub fn render(&self, controller: &GridController) -> Frame {
        let mut main = self.question(controller.message());
        main.push_str("\n\n");
        main.push_str(&self.table(controller));

        let bottom = controller.error().map_or_else(String::new, |error| {
            format!("{}{error}", self.theme.error_prefix.paint(">> "))
        });

        Frame { main, bottom }
    }

    fn question(&self, message: &str) -> String {
        let t = &self.theme;
        let mut out = t.prefix_style.paint(&t.prefix);
        out.push(' ');
        if !message.is_empty() {
            t.question.paint_into(&mut out, message);
            out.push(' ');
        }
        out.push_str("(Press ");
        t.key_hint.paint_into(&mut out, "<enter>");
        out.push_str(" to submit, ");
        t.key_hint.paint_into(&mut out, "<Up and Down>");
        out.push_str(" to move rows, ");
        t.key_hint.paint_into(&mut out, "<Left and Right>");
        out.push_str(" to move columns)");
        out
    }

    fn table(&self, controller: &GridController) -> String {
        let t = &self.theme;
        let cursor = controller.cursor();
        let window = controller.window();
        let rows = controller.rows();
        let columns = controller.columns();

        let mut head = Vec::with_capacity(columns.len() + 1);
        head.push(t.page_summary.paint(&window.summary(rows.len())));
        head.extend(columns.names().enumerate().map(|(c, name)| {
            if c == cursor.column {
                t.current_column.paint(name)
            } else {
                t.column.paint(name)
            }
        }));

        let body: Vec<Vec<String>> = (window.first..=window.last)
            .map(|r| {
                let label = if r == cursor.row {
                    t.current_row.paint(rows.name(r))
                } else {
                    t.row_label.paint(rows.name(r))
                };
                let mut line = Vec::with_capacity(columns.len() + 1);
                line.push(label);
                line.extend((0..columns.len()).map(|c| {
                    let value = controller.grid().get(r, c);
                    if r == cursor.row && c == cursor.column {
                        format!("[ {value} ]")
                    } else {
                        format!("  {value}  ")
                    }
                }));
                line
            })
            .collect();

        self.table.format(&head, &body)
    }
}
