//! Session property storage.
//!
//! A [`PropertyStore`] is the ordered list of extra settings attached to a
//! session or a search result. Names are unique within a store; updates go
//! through [`PropertyStore::merge`], which overwrites existing names in place
//! and appends new ones.

use serde::{Deserialize, Serialize};

use crate::value::TypedValue;

/// A named session setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Setting name.
    pub key: String,
    /// Setting value.
    pub value: TypedValue,
}

impl PropertyEntry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        PropertyEntry {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a byte entry. Bytes are stored as `Int32`.
    pub fn byte(key: impl Into<String>, value: u8) -> Self {
        Self::new(key, TypedValue::Int32(value as i32))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, TypedValue::Bool(value))
    }

    pub fn int(key: impl Into<String>, value: i32) -> Self {
        Self::new(key, TypedValue::Int32(value))
    }

    pub fn int64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, TypedValue::Int64(value))
    }

    pub fn float(key: impl Into<String>, value: f32) -> Self {
        Self::new(key, TypedValue::Float(value))
    }

    pub fn double(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, TypedValue::Double(value))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, TypedValue::String(value.into()))
    }
}

impl<K: Into<String>, V: Into<TypedValue>> From<(K, V)> for PropertyEntry {
    fn from((key, value): (K, V)) -> Self {
        PropertyEntry::new(key, value)
    }
}

/// Returns `true` when two setting names refer to the same setting.
///
/// Names match ignoring ASCII case.
pub(crate) fn same_key(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Ordered, unique-keyed collection of session settings.
///
/// Setting names are matched ignoring ASCII case. Collecting entries into a
/// store applies merge semantics, so a repeated name keeps its first
/// position and spelling and takes the last value.
///
/// # Example
///
/// ```
/// use sessionseek::{PropertyEntry, PropertyStore, TypedValue};
///
/// let base: PropertyStore = vec![
///     PropertyEntry::string("Region", "NA"),
///     PropertyEntry::int("Slots", 4),
/// ]
/// .into_iter()
/// .collect();
///
/// let merged = base.merge([
///     PropertyEntry::int("Slots", 2),
///     PropertyEntry::bool("Ranked", true),
/// ]);
///
/// assert_eq!(merged.len(), 3);
/// assert_eq!(merged.get("Slots"), Some(&TypedValue::Int32(2)));
/// assert_eq!(merged.keys().collect::<Vec<_>>(), ["Region", "Slots", "Ranked"]);
/// assert_eq!(base.get("Slots"), Some(&TypedValue::Int32(4)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PropertyEntry>", into = "Vec<PropertyEntry>")]
pub struct PropertyStore {
    entries: Vec<PropertyEntry>,
}

impl PropertyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        PropertyStore::default()
    }

    /// Returns a copy of this store with `updates` applied.
    ///
    /// Each update overwrites the value of the entry with the same name, or
    /// is appended when no such entry exists. `self` is left untouched.
    pub fn merge<I>(&self, updates: I) -> PropertyStore
    where
        I: IntoIterator,
        I::Item: Into<PropertyEntry>,
    {
        let mut merged = self.clone();
        for update in updates {
            merged.upsert(update.into());
        }
        merged
    }

    fn upsert(&mut self, update: PropertyEntry) {
        let mut found = false;
        for entry in self.entries.iter_mut().filter(|e| same_key(&e.key, &update.key)) {
            entry.value = update.value.clone();
            found = true;
        }
        if !found {
            self.entries.push(update);
        }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.entry(key).map(|e| &e.value)
    }

    /// Returns the first entry named `key`, if any.
    pub fn entry(&self, key: &str) -> Option<&PropertyEntry> {
        self.entries.iter().find(|e| same_key(&e.key, key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyEntry> {
        self.entries.iter()
    }

    /// Iterates setting names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn as_slice(&self) -> &[PropertyEntry] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<PropertyEntry> {
        self.entries
    }
}

impl<E: Into<PropertyEntry>> FromIterator<E> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        PropertyStore::new().merge(iter)
    }
}

impl From<Vec<PropertyEntry>> for PropertyStore {
    fn from(entries: Vec<PropertyEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<PropertyStore> for Vec<PropertyEntry> {
    fn from(store: PropertyStore) -> Self {
        store.entries
    }
}

impl<'a> IntoIterator for &'a PropertyStore {
    type Item = &'a PropertyEntry;
    type IntoIter = std::slice::Iter<'a, PropertyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for PropertyStore {
    type Item = PropertyEntry;
    type IntoIter = std::vec::IntoIter<PropertyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
