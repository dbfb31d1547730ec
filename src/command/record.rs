// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One parsed command: a verb plus positional operand fields.

use crate::error::ParseError;
use crate::registry::SlotId;

use super::Verb;

/// One parsed command line.
///
/// Fields are positional: field 0 is the raw verb string, the
/// remaining fields are operands. The typed extractors perform
/// verb-specific operand parsing once at dispatch entry, so a wrong
/// field count or a non-numeric operand surfaces as a structured
/// [`ParseError`] instead of leaking into later logic.
///
/// Records are produced by [`tokenize`](super::tokenize); a record
/// always has at least one non-empty field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    verb: Verb,
    fields: Vec<String>,
}

impl CommandRecord {
    /// Creates a record from a resolved verb and its raw fields.
    #[must_use]
    pub(crate) fn new(verb: Verb, fields: Vec<String>) -> Self {
        debug_assert!(!fields.is_empty());
        Self { verb, fields }
    }

    /// Returns the resolved verb.
    #[must_use]
    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    /// Returns all raw fields, verb included at position 0.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the number of fields, verb included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`: empty records are dropped at tokenize time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the raw operand at `position`, if present.
    #[must_use]
    pub fn operand(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(String::as_str)
    }

    /// Returns the operand at `position` as a string slice.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingOperand`] if the field is absent.
    pub fn str_operand(&self, position: usize) -> Result<&str, ParseError> {
        self.operand(position).ok_or_else(|| ParseError::MissingOperand {
            verb: self.verb.as_str().to_string(),
            position,
        })
    }

    /// Parses the operand at `position` as a `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingOperand`] if the field is absent,
    /// or [`ParseError::InvalidOperand`] if it is not a small integer.
    pub fn u8_operand(&self, position: usize) -> Result<u8, ParseError> {
        let raw = self.str_operand(position)?;
        raw.parse().map_err(|_| ParseError::InvalidOperand {
            field: format!("{} operand {position}", self.verb),
            message: format!("expected integer 0-255, got '{raw}'"),
        })
    }

    /// Parses the operand at `position` as a slot number.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CommandRecord::u8_operand`].
    pub fn slot_operand(&self, position: usize) -> Result<SlotId, ParseError> {
        self.u8_operand(position).map(SlotId::new)
    }

    /// Parses the operand at `position` as an `i64` event number.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingOperand`] or
    /// [`ParseError::InvalidOperand`].
    pub fn i64_operand(&self, position: usize) -> Result<i64, ParseError> {
        let raw = self.str_operand(position)?;
        raw.parse().map_err(|_| ParseError::InvalidOperand {
            field: format!("{} operand {position}", self.verb),
            message: format!("expected integer, got '{raw}'"),
        })
    }

    /// Parses the operand at `position` as an `f64` reading.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingOperand`] or
    /// [`ParseError::InvalidOperand`].
    pub fn f64_operand(&self, position: usize) -> Result<f64, ParseError> {
        let raw = self.str_operand(position)?;
        raw.parse().map_err(|_| ParseError::InvalidOperand {
            field: format!("{} operand {position}", self.verb),
            message: format!("expected number, got '{raw}'"),
        })
    }

    /// Joins the fields from `position` onward back into one string.
    ///
    /// Used by `settimer` to recover an embedded command from the tail
    /// of the record. Returns `None` if no fields remain.
    #[must_use]
    pub fn rest_joined(&self, position: usize, delimiter: char) -> Option<String> {
        if position >= self.fields.len() {
            return None;
        }
        Some(self.fields[position..].join(&delimiter.to_string()))
    }
}
