// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The set of named registries owned by a device controller.

use std::collections::HashMap;

use super::KeyRegistry;

/// Table name for actuator keys.
pub const ACTUATOR_TABLE: &str = "actuator";

/// Table name for sensor keys.
pub const SENSOR_TABLE: &str = "sensor";

/// Table name for logging keys.
pub const LOGGING_TABLE: &str = "logging";

/// A set of named [`KeyRegistry`] tables.
///
/// The original firmware keeps separate key lists per item kind
/// (actuators, sensors, logging values); this type owns them all so a
/// scenario reload can drop every table in one pass. Tables are
/// created lazily on first access.
///
/// # Examples
///
/// ```
/// use scenar_lib::registry::{RegistryTables, SlotId};
///
/// let mut tables = RegistryTables::new();
/// tables.table_mut("actuator").insert("pump", SlotId::new(3));
/// assert_eq!(tables.resolve("actuator", "pump"), Some(SlotId::new(3)));
/// assert_eq!(tables.resolve("sensor", "pump"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryTables {
    tables: HashMap<String, KeyRegistry>,
}

impl RegistryTables {
    /// Creates an empty set of tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table with the given name, creating it if absent.
    pub fn table_mut(&mut self, name: &str) -> &mut KeyRegistry {
        self.tables.entry(name.to_string()).or_default()
    }

    /// Returns the table with the given name, if it exists.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&KeyRegistry> {
        self.tables.get(name)
    }

    /// Resolves `key` in the named table.
    ///
    /// Returns `None` when either the table or the key is unknown;
    /// both are normal outcomes the caller must handle.
    #[must_use]
    pub fn resolve(&self, table: &str, key: &str) -> Option<super::SlotId> {
        self.tables.get(table).and_then(|t| t.get(key))
    }

    /// Drops every table.
    ///
    /// Called at the start of a scenario reload so no mapping from the
    /// previous configuration survives into the new one.
    pub fn clear_all(&mut self) {
        self.tables.clear();
    }

    /// Returns the number of named tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no tables exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SlotId;

    #[test]
    fn tables_are_created_lazily() {
        let mut tables = RegistryTables::new();
        assert!(tables.is_empty());
        tables.table_mut(ACTUATOR_TABLE).insert("pump", SlotId::new(1));
        assert_eq!(tables.len(), 1);
    }

    #[test]
    fn resolve_unknown_table_returns_none() {
        let tables = RegistryTables::new();
        assert_eq!(tables.resolve("nope", "pump"), None);
    }

    #[test]
    fn tables_are_independent() {
        let mut tables = RegistryTables::new();
        tables.table_mut(ACTUATOR_TABLE).insert("pump", SlotId::new(1));
        tables.table_mut(SENSOR_TABLE).insert("pump", SlotId::new(5));

        assert_eq!(
            tables.resolve(ACTUATOR_TABLE, "pump"),
            Some(SlotId::new(1))
        );
        assert_eq!(tables.resolve(SENSOR_TABLE, "pump"), Some(SlotId::new(5)));
    }

    #[test]
    fn clear_all_drops_every_table() {
        let mut tables = RegistryTables::new();
        tables.table_mut(ACTUATOR_TABLE).insert("pump", SlotId::new(1));
        tables.table_mut(LOGGING_TABLE).insert("temp", SlotId::new(0));

        tables.clear_all();

        assert!(tables.is_empty());
        assert_eq!(tables.resolve(ACTUATOR_TABLE, "pump"), None);
    }
}
