// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named events routed to the publish layer.

use serde::{Deserialize, Serialize};

/// A named event with an optional numeric payload and optional text.
///
/// Scenario scripts emit these with the `event` verb; the engine also
/// produces them for timer reads and push notifications. The publish
/// layer decides which MQTT topic or HTTP document carries them.
///
/// # Examples
///
/// ```
/// use scenar_lib::publish::EventPayload;
///
/// let event = EventPayload::numbered("watered", 1);
/// assert_eq!(event.name, "watered");
/// assert_eq!(event.number, Some(1));
///
/// let push = EventPayload::text("push", "tank empty");
/// assert_eq!(push.text.as_deref(), Some("tank empty"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event name.
    pub name: String,
    /// Numeric payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    /// Text payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EventPayload {
    /// Creates an event with a numeric payload.
    #[must_use]
    pub fn numbered(name: impl Into<String>, number: i64) -> Self {
        Self {
            name: name.into(),
            number: Some(number),
            text: None,
        }
    }

    /// Creates an event with a text payload.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: None,
            text: Some(text.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_event_omits_text() {
        let json = serde_json::to_value(EventPayload::numbered("door", 1)).unwrap();
        assert_eq!(json["number"], 1);
        assert!(json.get("text").is_none());
    }

    #[test]
    fn text_event_omits_number() {
        let json = serde_json::to_value(EventPayload::text("push", "hi")).unwrap();
        assert_eq!(json["text"], "hi");
        assert!(json.get("number").is_none());
    }
}
