// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Widget and chart definitions registered against data topics.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Maximum number of name/value parameter pairs per widget.
pub const MAX_WIDGET_PARAMS: usize = 3;

/// One name/value parameter attached to a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetParam {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub value: String,
}

/// A presentation widget registered against a data topic.
///
/// Widgets are owned by the publish layer; the engine only registers
/// them. A widget can carry up to [`MAX_WIDGET_PARAMS`] extra
/// name/value pairs.
///
/// # Examples
///
/// ```
/// use scenar_lib::publish::WidgetDef;
///
/// let mut widget = WidgetDef::new("Pump", "Main", 1, "toggle", "pump/state");
/// widget.try_add_param("color", "green").unwrap();
/// assert_eq!(widget.params.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDef {
    /// Display name.
    pub name: String,
    /// Page the widget appears on.
    pub page: String,
    /// Page ordering number.
    pub page_number: u8,
    /// Widget type (`"toggle"`, `"slider"`, ...); interpreted by the
    /// publish layer, opaque here.
    pub kind: String,
    /// Data topic the widget is bound to.
    pub topic: String,
    /// Extra name/value parameter pairs, at most [`MAX_WIDGET_PARAMS`].
    #[serde(default)]
    pub params: Vec<WidgetParam>,
}

impl WidgetDef {
    /// Creates a widget definition without extra parameters.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        page: impl Into<String>,
        page_number: u8,
        kind: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            page: page.into(),
            page_number,
            kind: kind.into(),
            topic: topic.into(),
            params: Vec::new(),
        }
    }

    /// Adds a name/value parameter pair.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TooManyWidgetParams`] if the widget
    /// already carries [`MAX_WIDGET_PARAMS`] pairs.
    pub fn try_add_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ValueError> {
        if self.params.len() >= MAX_WIDGET_PARAMS {
            return Err(ValueError::TooManyWidgetParams(self.params.len() + 1));
        }
        self.params.push(WidgetParam {
            name: name.into(),
            value: value.into(),
        });
        Ok(())
    }
}

/// A chart registered against a data topic.
///
/// Like widgets, charts are pure registrations; the publish layer owns
/// the backing series file and its retention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDef {
    /// Display name.
    pub name: String,
    /// Page the chart appears on.
    pub page: String,
    /// Page ordering number.
    pub page_number: u8,
    /// Backing series file name.
    pub file: String,
    /// Data topic the chart is bound to.
    pub topic: String,
    /// Maximum number of retained points.
    pub max_count: u32,
}

impl ChartDef {
    /// Creates a chart definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        page: impl Into<String>,
        page_number: u8,
        file: impl Into<String>,
        topic: impl Into<String>,
        max_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            page: page.into(),
            page_number,
            file: file.into(),
            topic: topic.into(),
            max_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_param_limit_is_enforced() {
        let mut widget = WidgetDef::new("W", "P", 1, "toggle", "t");
        widget.try_add_param("a", "1").unwrap();
        widget.try_add_param("b", "2").unwrap();
        widget.try_add_param("c", "3").unwrap();

        let err = widget.try_add_param("d", "4").unwrap_err();
        assert_eq!(err, ValueError::TooManyWidgetParams(4));
        assert_eq!(widget.params.len(), MAX_WIDGET_PARAMS);
    }

    #[test]
    fn widget_serializes_params() {
        let mut widget = WidgetDef::new("Pump", "Main", 1, "toggle", "pump/state");
        widget.try_add_param("color", "green").unwrap();

        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["name"], "Pump");
        assert_eq!(json["params"][0]["value"], "green");
    }

    #[test]
    fn widget_deserializes_without_params() {
        let widget: WidgetDef = serde_json::from_str(
            r#"{"name":"W","page":"P","page_number":2,"kind":"slider","topic":"t"}"#,
        )
        .unwrap();
        assert!(widget.params.is_empty());
        assert_eq!(widget.page_number, 2);
    }

    #[test]
    fn chart_round_trips() {
        let chart = ChartDef::new("Temp", "Main", 1, "temp.csv", "temp/avg", 100);
        let json = serde_json::to_string(&chart).unwrap();
        let back: ChartDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chart);
    }
}
