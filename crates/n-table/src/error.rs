// SPDX-License-Identifier: MIT
//! Error types.
//!
//! Two kinds of failure exist. Configuration mistakes (an empty axis, a
//! duplicate label, a zero page size) are caught when the controller is
//! built, before anything touches the terminal. Session failures are the
//! terminal going away underneath us, or the user interrupting.
//!
//! Navigation past an edge and deleting from an empty cell are not errors
//! at all; they are defined behavior of the controller.

use thiserror::Error;

/// Which axis a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Rows,
    Columns,
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rows => "rows",
            Self::Columns => "columns",
        })
    }
}

/// A configuration that cannot start a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must have at least one entry")]
    EmptyAxis(AxisKind),

    #[error("duplicate {axis} label {name:?}")]
    DuplicateLabel { axis: AxisKind, name: String },

    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Why a prompt session ended without an answer.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("invalid prompt configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The user pressed Ctrl+C / Ctrl+D, or input ended.
    #[error("prompt interrupted")]
    Interrupted,
}
