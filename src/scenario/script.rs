// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The persisted scenario script.

use std::path::Path;

/// A persisted scenario: an ordered sequence of command lines.
///
/// Line index has no semantic meaning beyond physical ordering; each
/// line is self-contained. Blank lines are skipped at load time;
/// malformed lines are kept here and rejected later by the dispatcher
/// (logged and skipped), so one bad line never blocks the rest of the
/// script.
///
/// A scenario is always reloaded wholesale on device reconfiguration,
/// never patched in place.
///
/// # Examples
///
/// ```
/// use scenar_lib::scenario::Scenario;
///
/// let scenario = Scenario::from_text("addkey,pump,3\n\nsettimer,3,10s");
/// assert_eq!(scenario.len(), 2);
/// assert_eq!(scenario.lines().next(), Some("addkey,pump,3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    lines: Vec<String>,
}

impl Scenario {
    /// Creates an empty scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a scenario from newline-separated text.
    ///
    /// Lines are trimmed; blank lines are dropped. Carriage returns
    /// from files written on other platforms are handled by the trim.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Reads a scenario from a file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read;
    /// the caller decides whether to keep the previous scenario.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Iterates over the command lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns the number of command lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the scenario has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
