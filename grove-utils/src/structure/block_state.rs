use std::collections::BTreeMap;

use crate::Identifier;

/// A palette entry: a block name and its state properties.
///
/// Properties are kept sorted, so two states with the same pairs compare equal
/// regardless of the order they were read in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    /// The block identifier, e.g. `minecraft:oak_leaves`.
    pub name: Identifier,
    /// Property name to value, e.g. `persistent` -> `true`.
    pub properties: BTreeMap<String, String>,
}

impl BlockState {
    /// Creates a state with no properties.
    #[must_use]
    pub const fn new(name: Identifier) -> Self {
        Self {
            name,
            properties: BTreeMap::new(),
        }
    }

    /// Builder form of [`Self::set_property`].
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Sets a property, replacing any previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Returns the value of a property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
