// SPDX-License-Identifier: MIT
//! Submit-time validation.
//!
//! A [`Validator`] sees the candidate [`Answer`] when the user presses
//! Enter. Rejecting it is not a failure of the session: the controller
//! goes back to editing with the grid and cursor untouched and shows the
//! message on the error line.

use regex::Regex;

use crate::answer::Answer;

/// Accepts or rejects a candidate answer.
pub trait Validator {
    /// `Ok(())` to accept, `Err(message)` to reject with a message for the user.
    ///
    /// # Errors
    ///
    /// The rejection message.
    fn validate(&self, answer: &Answer) -> Result<(), String>;
}

impl<F> Validator for F
where
    F: Fn(&Answer) -> Result<(), String>,
{
    fn validate(&self, answer: &Answer) -> Result<(), String> {
        self(answer)
    }
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _answer: &Answer) -> Result<(), String> {
        Ok(())
    }
}

/// Every cell must be filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Validator for Required {
    fn validate(&self, answer: &Answer) -> Result<(), String> {
        match answer.first_empty() {
            Some(cell) => Err(format!(
                "{} / {} is empty; every cell is required",
                cell.row, cell.column
            )),
            None => Ok(()),
        }
    }
}

/// Every non-empty cell must match a regular expression.
///
/// Anchor the pattern (`^...$`) to constrain the whole value.
#[derive(Debug, Clone)]
pub struct CellPattern {
    pattern: Regex,
}

impl CellPattern {
    #[must_use]
    pub const fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Validator for CellPattern {
    fn validate(&self, answer: &Answer) -> Result<(), String> {
        let bad = answer
            .records()
            .iter()
            .find(|r| !r.value.is_empty() && !self.pattern.is_match(&r.value));
        match bad {
            Some(cell) => Err(format!(
                "{} / {}: {:?} does not match {}",
                cell.row,
                cell.column,
                cell.value,
                self.pattern.as_str()
            )),
            None => Ok(()),
        }
    }
}

/// Runs validators in order; the first rejection wins.
#[derive(Default)]
pub struct AllOf {
    validators: Vec<Box<dyn Validator>>,
}

impl AllOf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a validator to the chain.
    #[must_use]
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl std::fmt::Debug for AllOf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllOf")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl Validator for AllOf {
    fn validate(&self, answer: &Answer) -> Result<(), String> {
        self.validators.iter().try_for_each(|v| v.validate(answer))
    }
}
