//! AttributeStore - flat key/value storage for binding passes
//!
//! One store backs one or more binding passes: Input passes read it,
//! Output passes mutate it in place. Keys are resolved attribute keys
//! (see the descriptor module); insertion order carries no meaning.
//!
//! Contract highlights:
//! - an absent key on Input leaves the corresponding field unchanged
//!   (the designed skip path, never an error)
//! - a present key mapped to explicit null is a legal input and is
//!   written through as-is
//! - Output passes overwrite unconditionally (no merge)
//!
//! Uses FxHashMap for faster hashing on small string keys.

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::value::AttrValue;

/// Flat mapping from attribute key to value, owned by the caller for the
/// duration of a binding pass.
#[derive(Clone, Debug, Default)]
pub struct AttributeStore {
    entries: FxHashMap<String, AttrValue>,
}

impl AttributeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the prior entry at that key if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Check for the presence of a key. Distinct from `get(..).is_some()`
    /// only in intent: presence gates Input-assign even when the mapped
    /// value is explicit null.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove an entry by key
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Serialize the store to a JSON object for event logging.
    ///
    /// Data entries appear verbatim; instances and type references
    /// collapse to their type names.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_log_value()))
            .collect();
        Value::Object(map)
    }
}
