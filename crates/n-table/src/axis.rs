// SPDX-License-Identifier: MIT
//! Row and column axes.
//!
//! An [`Axis`] is the fixed, ordered list of labels along one side of the
//! grid. It is validated once at construction (non-empty, unique names) and
//! never changes afterwards, so every index in `0..len()` is always valid
//! and `len() >= 1` holds for the whole session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AxisKind, ConfigError};

/// One labeled entry on an axis.
///
/// Deserializes from either `{"name": "..."}` or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LabelRepr")]
pub struct Label {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Bare(String),
    Entry { name: String },
}

impl From<LabelRepr> for Label {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Bare(name) | LabelRepr::Entry { name } => Self { name },
        }
    }
}

impl Label {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// An immutable, non-empty sequence of uniquely named labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    kind: AxisKind,
    labels: Vec<Label>,
}

impl Axis {
    /// Build an axis, rejecting an empty list or a repeated name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyAxis`] or [`ConfigError::DuplicateLabel`].
    pub fn new(kind: AxisKind, labels: Vec<Label>) -> Result<Self, ConfigError> {
        if labels.is_empty() {
            return Err(ConfigError::EmptyAxis(kind));
        }
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.name.as_str()) {
                return Err(ConfigError::DuplicateLabel {
                    axis: kind,
                    name: label.name.clone(),
                });
            }
        }
        Ok(Self { kind, labels })
    }

    /// Shorthand for building from plain names.
    ///
    /// # Errors
    ///
    /// Same as [`Axis::new`].
    pub fn from_names<S: AsRef<str>>(kind: AxisKind, names: &[S]) -> Result<Self, ConfigError> {
        Self::new(kind, names.iter().map(|n| Label::new(n.as_ref())).collect())
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> AxisKind {
        self.kind
    }

    /// Number of entries. Always at least 1.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Display name at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn name(&self, index: usize) -> &str {
        &self.labels[index].name
    }

    /// Index of the entry named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.name == name)
    }

    /// Names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}
