// SPDX-License-Identifier: MIT
//! The grid input state machine.
//!
//! [`GridController`] owns everything mutable about a session: the cursor,
//! the cell values, and the error line. All mutation goes through
//! [`apply`](GridController::apply), one [`GridEvent`] at a time:
//!
//! | Event       | Effect                                                   |
//! |-------------|----------------------------------------------------------|
//! | `MoveUp`    | row - 1, clamped at the first row                        |
//! | `MoveDown`  | row + 1, clamped at the last row                         |
//! | `MoveLeft`  | column - 1, wrapping to the last column                  |
//! | `MoveRight` | column + 1, wrapping to the first column                 |
//! | `Input(c)`  | append `c` to the focused cell                           |
//! | `Backspace` | drop the focused cell's last character, if any           |
//! | `Submit`    | validate; accept → done, reject → keep editing + message |
//! | `Interrupt` | end the session without an answer                        |
//!
//! The error line only lives for one frame: it is set by a rejected submit
//! and cleared by whatever event comes next.

use tracing::debug;

use crate::answer::Answer;
use crate::axis::Axis;
use crate::config::PromptConfig;
use crate::error::ConfigError;
use crate::event::GridEvent;
use crate::grid::{Cursor, ValueGrid};
use crate::paginate::{PageWindow, paginate};
use crate::validate::Validator;

/// Where the session stands after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Still editing; render and wait for the next event.
    Continue,
    /// Accepted. The session is over and this is the answer.
    Submitted(Answer),
    /// The user interrupted. The session is over with no answer.
    Interrupted,
}

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Editing,
    Done,
}

/// The grid input controller.
#[derive(Debug, Clone)]
pub struct GridController {
    message: String,
    rows: Axis,
    columns: Axis,
    page_size: usize,
    cursor: Cursor,
    grid: ValueGrid,
    error: Option<String>,
    status: Status,
}

impl GridController {
    /// Validate `config` and start at the top-left cell with an empty grid.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`PromptConfig::validate`].
    pub fn new(config: &PromptConfig) -> Result<Self, ConfigError> {
        let (rows, columns) = config.validate()?;
        let grid = ValueGrid::new(rows.len(), columns.len());
        Ok(Self {
            message: config.message.clone(),
            rows,
            columns,
            page_size: config.page_size,
            cursor: Cursor::ORIGIN,
            grid,
            error: None,
            status: Status::Editing,
        })
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn rows(&self) -> &Axis {
        &self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> &Axis {
        &self.columns
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn grid(&self) -> &ValueGrid {
        &self.grid
    }

    /// The message from the last rejected submit, if it is still showing.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Rows currently visible.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        paginate(self.page_size, self.cursor.row, self.rows.len())
    }

    /// The answer as it would be submitted right now.
    #[must_use]
    pub fn answer(&self) -> Answer {
        Answer::collect(&self.rows, &self.columns, &self.grid)
    }

    // -- Transitions --------------------------------------------------------

    /// Apply one event.
    ///
    /// Events after the session is done are ignored.
    pub fn apply(&mut self, event: GridEvent, validator: &impl Validator) -> Step {
        if self.status == Status::Done {
            return Step::Continue;
        }
        self.error = None;

        match event {
            GridEvent::MoveUp => self.cursor.move_up(),
            GridEvent::MoveDown => self.cursor.move_down(self.rows.len()),
            GridEvent::MoveLeft => self.cursor.move_left(self.columns.len()),
            GridEvent::MoveRight => self.cursor.move_right(self.columns.len()),
            GridEvent::Input(ch) => self.grid.push(self.cursor, ch),
            GridEvent::Backspace => {
                self.grid.pop(self.cursor);
            }
            GridEvent::Submit => return self.submit(validator),
            GridEvent::Interrupt => {
                debug!("interrupted");
                self.status = Status::Done;
                return Step::Interrupted;
            }
        }

        debug!(
            ?event,
            row = self.cursor.row,
            column = self.cursor.column,
            "grid transition"
        );
        Step::Continue
    }

    fn submit(&mut self, validator: &impl Validator) -> Step {
        let answer = self.answer();
        match validator.validate(&answer) {
            Ok(()) => {
                debug!(cells = answer.records().len(), "submit accepted");
                self.status = Status::Done;
                Step::Submitted(answer)
            }
            Err(message) => {
                debug!(%message, "submit rejected");
                self.error = Some(message);
                Step::Continue
            }
        }
    }
}
