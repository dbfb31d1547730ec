// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting raw command text into command records.

use super::{CommandRecord, Verb};

/// How a raw command line is split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeMode {
    /// The whole trimmed input is a single field.
    Buffer,
    /// Split on `,`; empty fields are preserved (positions matter).
    Csv,
    /// Split on whitespace runs; consecutive delimiters collapse, so
    /// no empty fields are produced.
    Space,
}

impl TokenizeMode {
    /// Picks a mode from the shape of the input.
    ///
    /// A line containing a comma is CSV, otherwise a line containing
    /// whitespace is space-delimited, otherwise the whole line is one
    /// buffer-mode field.
    #[must_use]
    pub fn detect(line: &str) -> Self {
        let line = line.trim();
        if line.contains(',') {
            Self::Csv
        } else if line.contains(char::is_whitespace) {
            Self::Space
        } else {
            Self::Buffer
        }
    }
}

/// Tokenizes one raw line into a [`CommandRecord`].
///
/// The line is trimmed first, then split according to `mode`. Returns
/// `None` for input that produces no fields (blank line, or CSV input
/// whose first field is empty): a record with no verb is dropped,
/// never dispatched.
///
/// # Examples
///
/// ```
/// use scenar_lib::command::{tokenize, TokenizeMode};
///
/// // CSV mode preserves empty fields.
/// let record = tokenize("a,,c", TokenizeMode::Csv).unwrap();
/// assert_eq!(record.fields(), &["a", "", "c"]);
///
/// // Space mode collapses whitespace runs.
/// let record = tokenize("a   b c", TokenizeMode::Space).unwrap();
/// assert_eq!(record.fields(), &["a", "b", "c"]);
///
/// // Blank input yields no record.
/// assert!(tokenize("   ", TokenizeMode::Csv).is_none());
/// ```
#[must_use]
pub fn tokenize(line: &str, mode: TokenizeMode) -> Option<CommandRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<String> = match mode {
        TokenizeMode::Buffer => vec![line.to_string()],
        TokenizeMode::Csv => line.split(',').map(str::to_string).collect(),
        TokenizeMode::Space => line.split_whitespace().map(str::to_string).collect(),
    };

    // An empty first field has no verb to dispatch.
    if fields.first().is_none_or(|f| f.is_empty()) {
        tracing::warn!(line = %line, "dropping record with empty verb field");
        return None;
    }

    let verb = Verb::parse(&fields[0]);
    Some(CommandRecord::new(verb, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_preserves_empty_fields() {
        let record = tokenize("a,,c", TokenizeMode::Csv).unwrap();
        assert_eq!(record.fields(), &["a", "", "c"]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn space_collapses_runs() {
        let record = tokenize("a   b c", TokenizeMode::Space).unwrap();
        assert_eq!(record.fields(), &["a", "b", "c"]);
    }

    #[test]
    fn buffer_is_single_field() {
        let record = tokenize("  reload  ", TokenizeMode::Buffer).unwrap();
        assert_eq!(record.fields(), &["reload"]);
        assert_eq!(record.verb(), &Verb::Reload);
    }

    #[test]
    fn blank_line_yields_none() {
        assert!(tokenize("", TokenizeMode::Csv).is_none());
        assert!(tokenize("   ", TokenizeMode::Space).is_none());
        assert!(tokenize("\t", TokenizeMode::Buffer).is_none());
    }

    #[test]
    fn empty_verb_field_yields_none() {
        // Leading comma means field 0 is empty: no verb to dispatch.
        assert!(tokenize(",on", TokenizeMode::Csv).is_none());
    }

    #[test]
    fn csv_trailing_empty_field_is_kept() {
        let record = tokenize("set,param,", TokenizeMode::Csv).unwrap();
        assert_eq!(record.fields(), &["set", "param", ""]);
    }

    #[test]
    fn detect_picks_csv_over_space() {
        assert_eq!(TokenizeMode::detect("settimer,3,10"), TokenizeMode::Csv);
        assert_eq!(TokenizeMode::detect("pin 13 on"), TokenizeMode::Space);
        assert_eq!(TokenizeMode::detect("reload"), TokenizeMode::Buffer);
        // Mixed input: the comma wins.
        assert_eq!(TokenizeMode::detect("event,door open,1"), TokenizeMode::Csv);
    }

    #[test]
    fn verb_is_resolved_at_tokenize_time() {
        let record = tokenize("pump,on", TokenizeMode::Csv).unwrap();
        assert_eq!(record.verb(), &Verb::Unknown("pump".to_string()));
    }
}
