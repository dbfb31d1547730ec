// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed set of command verbs.

/// A command verb, resolved from field 0 of a command record.
///
/// The verb set is closed: anything outside it becomes
/// [`Verb::Unknown`], which the dispatcher handles explicitly (it may
/// still resolve as an actuator key, otherwise it is logged and
/// skipped). Verbs are case-sensitive and lowercase.
///
/// # Examples
///
/// ```
/// use scenar_lib::command::Verb;
///
/// assert_eq!(Verb::parse("settimer"), Verb::SetTimer);
/// assert_eq!(Verb::parse("SETTIMER"), Verb::Unknown("SETTIMER".to_string()));
/// assert_eq!(Verb::SetTimer.as_str(), "settimer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// `addkey,<key>,<slot>[,<table>]` - register a symbolic key.
    AddKey,
    /// `settimer,<slot>,<duration>[,once|repeat[,<command...>]]` - arm a timer.
    SetTimer,
    /// `deltimer,<slot>` - stop and free a timer slot.
    DelTimer,
    /// `timerstart[,<slot>]` - resume one timer, or the whole engine.
    TimerStart,
    /// `timerstop[,<slot>]` - pause one timer, or the whole engine.
    TimerStop,
    /// `readtimer,<slot>` - publish the remaining time of a timer.
    ReadTimer,
    /// `event,<name>,<number>` - emit a named numeric event.
    Event,
    /// `set,<param>,<value>` - set a configuration parameter.
    Set,
    /// `widget,<name>,<page>,<page_number>,<type>,<topic>` - register a widget.
    Widget,
    /// `widgetparam,...` - register a widget with up to three parameter pairs.
    WidgetParam,
    /// `chart,<name>,<page>,<page_number>,<file>,<topic>,<max_count>` - register a chart.
    Chart,
    /// `sensor,<key>,<value>` - fold a sensor reading into its accumulator.
    Sensor,
    /// `logging,<key>` - add a key to the logging list.
    Logging,
    /// `push,<message>` - emit a push notification event.
    Push,
    /// `reload` - request a scenario reload after the current pass.
    Reload,
    /// Any other field 0 value; may resolve as an actuator key.
    Unknown(String),
}

impl Verb {
    /// Resolves a raw field 0 string to a verb.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "addkey" => Self::AddKey,
            "settimer" => Self::SetTimer,
            "deltimer" => Self::DelTimer,
            "timerstart" => Self::TimerStart,
            "timerstop" => Self::TimerStop,
            "readtimer" => Self::ReadTimer,
            "event" => Self::Event,
            "set" => Self::Set,
            "widget" => Self::Widget,
            "widgetparam" => Self::WidgetParam,
            "chart" => Self::Chart,
            "sensor" => Self::Sensor,
            "logging" => Self::Logging,
            "push" => Self::Push,
            "reload" => Self::Reload,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the canonical verb string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AddKey => "addkey",
            Self::SetTimer => "settimer",
            Self::DelTimer => "deltimer",
            Self::TimerStart => "timerstart",
            Self::TimerStop => "timerstop",
            Self::ReadTimer => "readtimer",
            Self::Event => "event",
            Self::Set => "set",
            Self::Widget => "widget",
            Self::WidgetParam => "widgetparam",
            Self::Chart => "chart",
            Self::Sensor => "sensor",
            Self::Logging => "logging",
            Self::Push => "push",
            Self::Reload => "reload",
            Self::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
