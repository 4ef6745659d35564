// SPDX-License-Identifier: MIT
//! Prompt configuration.
//!
//! A config is a JSON question object:
//!
//! ```json
//! {
//!   "name": "workouts",
//!   "message": "Fill in your week",
//!   "columns": [{ "name": "Mon" }, { "name": "Tue" }],
//!   "rows": [{ "name": "Run" }, { "name": "Swim" }],
//!   "pageSize": 5
//! }
//! ```
//!
//! Unknown keys (`type`, `default`, ...) are ignored. Labels may also be
//! bare strings. Everything is checked once, up front, by
//! [`PromptConfig::validate`]; a config that passes can always start a
//! session.

use serde::Deserialize;

use crate::axis::{Axis, Label};
use crate::error::{AxisKind, ConfigError};

/// Rows shown at once when the config does not say.
pub const DEFAULT_PAGE_SIZE: usize = 5;

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Everything fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    /// Key under which the answer is reported, when wrapped.
    #[serde(default)]
    pub name: String,
    /// Question text shown above the table.
    #[serde(default)]
    pub message: String,
    pub columns: Vec<Label>,
    pub rows: Vec<Label>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl PromptConfig {
    /// A config with the given axes and defaults for everything else.
    #[must_use]
    pub fn new(rows: Vec<Label>, columns: Vec<Label>) -> Self {
        Self {
            name: String::new(),
            message: String::new(),
            columns,
            rows,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Builder: set the question text.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Builder: set the answer name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: set the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Check the config and build both axes.
    ///
    /// # Errors
    ///
    /// An empty or duplicate-labeled axis, or a zero page size.
    pub fn validate(&self) -> Result<(Axis, Axis), ConfigError> {
        let rows = Axis::new(AxisKind::Rows, self.rows.clone())?;
        let columns = Axis::new(AxisKind::Columns, self.columns.clone())?;
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok((rows, columns))
    }
}
