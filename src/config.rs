//! Configuration-property container.
//!
//! Menus are driven reactively through named properties: setting one queues
//! a change that the owning widget drains and routes to the handler for
//! that key. The drain step exists because a handler typically mutates the
//! widget that owns the store, which rules out invoking callbacks from
//! inside `set` directly.

use std::collections::{BTreeMap, VecDeque};

use crate::node::Trigger;

pub type PropertyKey = &'static str;

/// The trigger element(s) of a context menu.
pub const TRIGGER: PropertyKey = "trigger";
/// Menu position, `(column, row)`.
pub const POSITION: PropertyKey = "xy";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    /// Explicitly unset; for `trigger` this means "detach everything".
    #[default]
    None,
    Trigger(Trigger),
    Position(u16, u16),
}

/// Named-property store with queued change notification.
#[derive(Debug, Default)]
pub struct ConfigStore {
    values: BTreeMap<PropertyKey, ConfigValue>,
    pending: VecDeque<(PropertyKey, ConfigValue)>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property. Setting an undeclared key is rejected, so widgets
    /// state their schema up front.
    pub fn add_property(&mut self, key: PropertyKey, initial: ConfigValue) {
        self.values.entry(key).or_insert(initial);
    }

    pub fn has_property(&self, key: PropertyKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: PropertyKey) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Set a declared property and queue the change for routing. Returns
    /// false for undeclared keys.
    pub fn set(&mut self, key: PropertyKey, value: ConfigValue) -> bool {
        let Some(slot) = self.values.get_mut(key) else {
            return false;
        };
        *slot = value.clone();
        self.pending.push_back((key, value));
        true
    }

    /// Bulk-apply pairs, skipping keys the store does not declare.
    ///
    /// Unknown keys are logged and passed over rather than aborting the
    /// batch, so a partially applicable configuration object still takes
    /// effect where it can.
    pub fn apply(&mut self, pairs: impl IntoIterator<Item = (PropertyKey, ConfigValue)>) {
        for (key, value) in pairs {
            if !self.set(key, value) {
                tracing::debug!(key, "skipping unknown configuration property");
            }
        }
    }

    /// Drain queued changes in the order they were set.
    pub fn take_changes(&mut self) -> Vec<(PropertyKey, ConfigValue)> {
        self.pending.drain(..).collect()
    }
}
