//! The structured model a data source holds in memory.

use std::collections::BTreeMap;

use crate::KeyPath;

/// A mapping from key paths to string values.
///
/// Key uniqueness is the model's responsibility. Enumeration order of
/// `key_paths` is whatever the implementation defines.
pub trait Model: Send + Sync {
    fn get(&self, key: &KeyPath) -> Option<&str>;

    /// Store `value` at `key`, or remove the key when `value` is `None`.
    fn set(&mut self, key: &KeyPath, value: Option<String>);

    fn key_paths(&self) -> Vec<KeyPath>;
}

/// The default model: an ordered map keyed by segment sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeModel {
    entries: BTreeMap<KeyPath, String>,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyPath, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Insert, returning the previous value.
    pub fn insert(&mut self, key: KeyPath, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key, value.into())
    }
}

impl Model for TreeModel {
    fn get(&self, key: &KeyPath) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &KeyPath, value: Option<String>) {
        match value {
            Some(value) => {
                self.entries.insert(key.clone(), value);
            }
            None => {
                self.entries.remove(key);
            }
        }
    }

    fn key_paths(&self) -> Vec<KeyPath> {
        self.entries.keys().cloned().collect()
    }
}

impl FromIterator<(KeyPath, String)> for TreeModel {
    fn from_iter<I: IntoIterator<Item = (KeyPath, String)>>(iter: I) -> Self {
        TreeModel {
            entries: iter.into_iter().collect(),
        }
    }
}
