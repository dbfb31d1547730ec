// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command parsing: tokenizer modes, verbs, and command records.
//!
//! One line of scenario text becomes one [`CommandRecord`]: a verb plus
//! positional operand fields. Three tokenizer modes cover the shapes a
//! command can arrive in:
//!
//! | Mode | Behavior | Source |
//! |------|----------|--------|
//! | [`TokenizeMode::Buffer`] | Whole trimmed input is one field | Raw payloads |
//! | [`TokenizeMode::Csv`] | Split on `,`, empty fields preserved | Scenario lines |
//! | [`TokenizeMode::Space`] | Split on whitespace runs, no empty fields | HTTP query commands |
//!
//! # Delimiter limitation
//!
//! There is no quoting or escape syntax: an operand value containing
//! the active delimiter cannot be represented. This matches the
//! scenario file format and is deliberate.
//!
//! # Examples
//!
//! ```
//! use scenar_lib::command::{tokenize, TokenizeMode, Verb};
//!
//! let record = tokenize("settimer,3,10s", TokenizeMode::Csv).unwrap();
//! assert_eq!(record.verb(), &Verb::SetTimer);
//! assert_eq!(record.operand(1), Some("3"));
//! assert_eq!(record.operand(2), Some("10s"));
//! ```

mod record;
mod tokenizer;
mod verb;

pub use record::CommandRecord;
pub use tokenizer::{TokenizeMode, tokenize};
pub use verb::Verb;
