// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single key-to-slot lookup table.

use std::collections::HashMap;

use crate::error::RegistryError;

/// Numeric slot identifier.
///
/// Slots are small dense integers addressing timer table entries,
/// actuator channels, and sensor accumulators. An absent key resolves
/// to `None` rather than a sentinel integer.
///
/// # Examples
///
/// ```
/// use scenar_lib::registry::SlotId;
///
/// let slot = SlotId::new(3);
/// assert_eq!(slot.value(), 3);
/// assert_eq!(slot.to_string(), "slot 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    /// Creates a slot identifier with the given value.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw slot number.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the slot number as a table index.
    #[must_use]
    pub fn index(&self) -> usize {
        usize::from(self.0)
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

impl From<u8> for SlotId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// One named key-to-slot lookup table.
///
/// Insertion is idempotent: re-registering an existing key is a no-op,
/// even with a different slot number, so a key keeps the slot it was
/// first registered with for the lifetime of the registry. Lookup of
/// an unknown key returns `None` and is a normal outcome at every call
/// site, never an error.
///
/// # Examples
///
/// ```
/// use scenar_lib::registry::{KeyRegistry, SlotId};
///
/// let mut registry = KeyRegistry::new();
/// registry.insert("pump", SlotId::new(3));
/// assert_eq!(registry.get("pump"), Some(SlotId::new(3)));
/// assert_eq!(registry.get("valve"), None);
///
/// // Re-registration does not move the key.
/// registry.insert("pump", SlotId::new(7));
/// assert_eq!(registry.get("pump"), Some(SlotId::new(3)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    slots: HashMap<String, SlotId>,
    /// Next candidate for auto-assignment; skips explicitly taken slots.
    next_auto: u8,
}

impl KeyRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` with the given slot number.
    ///
    /// If the key is already registered this is a no-op and the key
    /// keeps its original slot. Returns the slot the key resolves to
    /// after the call.
    pub fn insert(&mut self, key: impl Into<String>, slot: SlotId) -> SlotId {
        let key = key.into();
        if let Some(existing) = self.slots.get(&key) {
            tracing::debug!(key = %key, slot = %existing, "key already registered, keeping slot");
            return *existing;
        }
        self.slots.insert(key, slot);
        slot
    }

    /// Registers `key` with the next free slot number.
    ///
    /// If the key is already registered, its existing slot is returned
    /// unchanged. Slot numbers are assigned on first insertion and are
    /// stable for the registry's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TableFull`] when every slot number is
    /// occupied; the failed registration has no side effects.
    pub fn assign(&mut self, key: impl Into<String>) -> Result<SlotId, RegistryError> {
        let key = key.into();
        if let Some(existing) = self.slots.get(&key) {
            return Ok(*existing);
        }
        // The candidate scan is bounded to one full wrap of the slot
        // space, so a full table is an error, not a spin.
        for _ in 0..=u8::MAX {
            let candidate = SlotId::new(self.next_auto);
            self.next_auto = self.next_auto.wrapping_add(1);
            if !self.slot_in_use(candidate) {
                self.slots.insert(key, candidate);
                return Ok(candidate);
            }
        }
        tracing::warn!(key = %key, "no free slot for key");
        Err(RegistryError::TableFull)
    }

    /// Resolves `key` to its slot, or `None` if the key is unknown.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<SlotId> {
        self.slots.get(key).copied()
    }

    /// Returns `true` if the key is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over `(key, slot)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SlotId)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Removes all keys, resetting auto-assignment.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_auto = 0;
    }

    fn slot_in_use(&self, slot: SlotId) -> bool {
        self.slots.values().any(|s| *s == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_is_empty() {
        let registry = KeyRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn insert_and_get() {
        let mut registry = KeyRegistry::new();
        registry.insert("pump", SlotId::new(3));
        assert_eq!(registry.get("pump"), Some(SlotId::new(3)));
    }

    #[test]
    fn unknown_key_returns_none() {
        let registry = KeyRegistry::new();
        assert_eq!(registry.get("ghost"), None);

        let mut registry = KeyRegistry::new();
        registry.insert("pump", SlotId::new(1));
        assert_eq!(registry.get("ghost"), None);
    }

    #[test]
    fn reinsert_is_idempotent() {
        let mut registry = KeyRegistry::new();
        registry.insert("pump", SlotId::new(3));
        let resolved = registry.insert("pump", SlotId::new(9));
        assert_eq!(resolved, SlotId::new(3));
        assert_eq!(registry.get("pump"), Some(SlotId::new(3)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_keys_distinct_slots() {
        let mut registry = KeyRegistry::new();
        registry.insert("pump", SlotId::new(3));
        registry.insert("valve", SlotId::new(4));
        assert_ne!(registry.get("pump"), registry.get("valve"));
    }

    #[test]
    fn assign_uses_next_free_slot() {
        let mut registry = KeyRegistry::new();
        assert_eq!(registry.assign("a").unwrap(), SlotId::new(0));
        assert_eq!(registry.assign("b").unwrap(), SlotId::new(1));
        // Existing key keeps its slot.
        assert_eq!(registry.assign("a").unwrap(), SlotId::new(0));
    }

    #[test]
    fn assign_skips_explicitly_taken_slots() {
        let mut registry = KeyRegistry::new();
        registry.insert("pump", SlotId::new(0));
        registry.insert("valve", SlotId::new(1));
        assert_eq!(registry.assign("fan").unwrap(), SlotId::new(2));
    }

    #[test]
    fn assign_reports_exhaustion_when_every_slot_is_taken() {
        let mut registry = KeyRegistry::new();
        for i in 0..=u8::MAX {
            registry.assign(format!("key{i}")).unwrap();
        }

        // The 257th key must fail cleanly, not scan forever.
        let err = registry.assign("one-too-many").unwrap_err();
        assert_eq!(err, RegistryError::TableFull);
        assert_eq!(registry.len(), 256);
        assert!(!registry.contains("one-too-many"));

        // Known keys still resolve after the failure.
        assert_eq!(registry.assign("key0").unwrap(), SlotId::new(0));
    }

    #[test]
    fn clear_removes_everything() {
        let mut registry = KeyRegistry::new();
        registry.insert("pump", SlotId::new(3));
        registry.assign("temp").unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.get("pump"), None);
        // Auto-assignment restarts from zero.
        assert_eq!(registry.assign("fresh").unwrap(), SlotId::new(0));
    }

    #[test]
    fn iter_yields_all_pairs() {
        let mut registry = KeyRegistry::new();
        registry.insert("a", SlotId::new(1));
        registry.insert("b", SlotId::new(2));
        let mut pairs: Vec<_> = registry.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a", SlotId::new(1)), ("b", SlotId::new(2))]);
    }
}
