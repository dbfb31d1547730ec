// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The FIFO queue of pending command strings.

use std::collections::VecDeque;

/// FIFO queue of command strings awaiting dispatch.
///
/// Insertion order is execution order: a multi-step automation runs
/// its steps in author-specified order even when asynchronous sources
/// interleave their own pushes. [`LoopBuffer::drain_pass`] takes the
/// whole current contents in one swap, so commands pushed while a
/// drain is in progress land in the *next* pass, never the current
/// one.
///
/// # Examples
///
/// ```
/// use scenar_lib::scenario::LoopBuffer;
///
/// let mut buffer = LoopBuffer::new();
/// buffer.push("cmdA");
/// buffer.push("cmdB");
///
/// let pass = buffer.drain_pass();
/// assert_eq!(pass, vec!["cmdA".to_string(), "cmdB".to_string()]);
/// assert!(buffer.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoopBuffer {
    pending: VecDeque<String>,
}

impl LoopBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command string to the end of the queue.
    ///
    /// Blank commands are ignored.
    pub fn push(&mut self, command: impl Into<String>) {
        let command = command.into();
        if command.trim().is_empty() {
            tracing::trace!("ignoring blank command");
            return;
        }
        tracing::trace!(command = %command, "command queued");
        self.pending.push_back(command);
    }

    /// Takes every currently queued command, in FIFO order.
    ///
    /// The buffer is left empty; pushes performed while the returned
    /// batch is being processed belong to the next pass.
    #[must_use]
    pub fn drain_pass(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending).into()
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discards every queued command.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_fifo_order() {
        let mut buffer = LoopBuffer::new();
        buffer.push("cmdA");
        buffer.push("cmdB");
        buffer.push("cmdC");

        assert_eq!(
            buffer.drain_pass(),
            vec!["cmdA".to_string(), "cmdB".to_string(), "cmdC".to_string()]
        );
    }

    #[test]
    fn drain_leaves_buffer_empty() {
        let mut buffer = LoopBuffer::new();
        buffer.push("cmdA");
        let _ = buffer.drain_pass();
        assert!(buffer.is_empty());
        assert!(buffer.drain_pass().is_empty());
    }

    #[test]
    fn mid_drain_push_lands_in_next_pass() {
        let mut buffer = LoopBuffer::new();
        buffer.push("cmdA");
        buffer.push("cmdB");

        let pass = buffer.drain_pass();
        // Simulates an insertion while the batch is being processed.
        buffer.push("cmdD");

        assert_eq!(pass, vec!["cmdA".to_string(), "cmdB".to_string()]);
        assert_eq!(buffer.drain_pass(), vec!["cmdD".to_string()]);
    }

    #[test]
    fn blank_commands_are_ignored() {
        let mut buffer = LoopBuffer::new();
        buffer.push("");
        buffer.push("   ");
        assert!(buffer.is_empty());
    }

    #[test]
    fn clear_discards_pending() {
        let mut buffer = LoopBuffer::new();
        buffer.push("cmdA");
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
