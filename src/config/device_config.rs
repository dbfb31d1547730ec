// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device/widget configuration document.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::publish::WidgetDef;

/// Firmware version stamped into every loaded configuration.
pub const FIRMWARE_VERSION: u32 = 1;

/// Seed entry binding a symbolic key to a numeric slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySeed {
    /// Symbolic key.
    pub key: String,
    /// Numeric slot.
    pub slot: u8,
}

/// The device/widget configuration.
///
/// Loaded from persisted JSON once per (re)load. Field names follow
/// the on-flash document format.
///
/// # Examples
///
/// ```
/// use scenar_lib::config::DeviceConfig;
///
/// let config = DeviceConfig::from_json(
///     r#"{"chipID":"aabbcc","mqttPrefix":"home","scen":"1"}"#,
/// ).unwrap();
/// assert!(config.scenario_enabled());
/// assert_eq!(config.topic_prefix(), "home/aabbcc");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device chip identifier.
    #[serde(rename = "chipID", default)]
    pub chip_id: String,
    /// MQTT topic prefix (combined with the chip id for publishing).
    #[serde(rename = "mqttPrefix", default)]
    pub mqtt_prefix: String,
    /// `"1"` when the scenario script should be loaded.
    #[serde(default = "default_scen")]
    pub scen: String,
    /// Firmware version, stamped at load time.
    #[serde(default)]
    pub firmware_version: u32,
    /// Free-form parameters referenced by `set`/`{param}` substitution.
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Actuator key seeds.
    #[serde(default)]
    pub actuators: Vec<KeySeed>,
    /// Sensor key seeds (slots auto-assigned in listed order).
    #[serde(default)]
    pub sensors: Vec<String>,
    /// Widget registrations issued at load time.
    #[serde(default)]
    pub widgets: Vec<WidgetDef>,
}

fn default_scen() -> String {
    "1".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            chip_id: String::new(),
            mqtt_prefix: String::new(),
            scen: default_scen(),
            firmware_version: FIRMWARE_VERSION,
            params: HashMap::new(),
            actuators: Vec::new(),
            sensors: Vec::new(),
            widgets: Vec::new(),
        }
    }
}

impl DeviceConfig {
    /// Parses a configuration document.
    ///
    /// Stray CR/LF pairs from files edited on other platforms are
    /// stripped first, and the firmware version is stamped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for a malformed document; the
    /// caller keeps its previous configuration in that case.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let json = json.replace("\r\n", "");
        let mut config: Self = serde_json::from_str(&json)?;
        config.firmware_version = FIRMWARE_VERSION;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read or
    /// [`ConfigError::Json`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Returns `true` when the scenario script should be loaded.
    #[must_use]
    pub fn scenario_enabled(&self) -> bool {
        self.scen == "1"
    }

    /// Returns the full MQTT topic prefix, `<mqttPrefix>/<chipID>`.
    #[must_use]
    pub fn topic_prefix(&self) -> String {
        format!("{}/{}", self.mqtt_prefix, self.chip_id)
    }

    /// Resolves a free-form parameter to its current value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Sets a free-form parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }
}
