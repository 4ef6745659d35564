// SPDX-License-Identifier: MIT
//! n-table: a grid input prompt.
//!
//! The user fills in a rows × columns table of text cells with the
//! keyboard and submits it as one flat answer keyed `"<row>_<column>"`.
//!
//! The pieces, bottom up:
//!
//! - [`axis`], [`grid`]: labels, the cursor and the cell values.
//! - [`paginate`]: which rows are visible for a given cursor row.
//! - [`answer`]: the submitted snapshot and its flat JSON form.
//! - [`controller`]: the state machine every event goes through.
//! - [`render`]: controller state to a [`Frame`](render::Frame) of text.
//! - [`session`]: the receive loop and its collaborator traits.
//! - [`backend`]: those collaborators on a real terminal, via `n-term`.
//!
//! ```no_run
//! use n_table::backend::{self, TerminalSink, TerminalSource};
//! use n_table::{PromptConfig, Label, Required, Theme};
//!
//! let config = PromptConfig::new(
//!     vec![Label::new("mon"), Label::new("tue")],
//!     vec![Label::new("am"), Label::new("pm")],
//! )
//! .message("Hours worked");
//! let mut source = TerminalSource::spawn();
//! let mut sink = TerminalSink::stderr();
//! let answer = backend::prompt(&config, Required, Theme::for_terminal(), &mut source, &mut sink)?;
//! source.stop();
//! println!("{}", serde_json::to_string(&answer).unwrap());
//! # Ok::<(), n_table::PromptError>(())
//! ```

pub mod answer;
pub mod axis;
pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod grid;
pub mod paginate;
pub mod render;
pub mod session;
pub mod validate;

pub use answer::Answer;
pub use axis::Label;
pub use config::PromptConfig;
pub use controller::{GridController, Step};
pub use error::{ConfigError, PromptError};
pub use event::GridEvent;
pub use render::Theme;
pub use session::Session;
pub use validate::{AcceptAll, AllOf, CellPattern, Required, Validator};
