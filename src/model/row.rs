//! Row: the named-field record every table is made of.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Value;

static NULL: Value = Value::Null;

/// An ordered map of field names to values.
///
/// Reading a field that was never set yields [`Value::Null`] rather than an
/// error, so rows from different sheets can be unioned without first agreeing
/// on a schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Rename a field in place. No-op when `from` is unset.
    pub fn rename(&mut self, from: &str, to: &str) {
        let Some(idx) = self.fields.get_index_of(from) else { return };
        let value = self.fields.shift_remove_index(idx).map(|(_, v)| v).unwrap_or_default();
        match self.fields.get_mut(to) {
            Some(slot) => *slot = value,
            None => {
                self.fields.shift_insert(idx, to.to_string(), value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.fields.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Row {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_field_reads_as_null() {
        let row = Row::new().with("Name", "ISR");
        assert_eq!(row.get("Name"), &Value::from("ISR"));
        assert!(row.get("Size").is_null());
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut row = Row::from(vec![("a", 1), ("b", 2), ("c", 3)]);
        row.rename("b", "z");
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "z", "c"]);
        assert_eq!(row.get("z"), &Value::Int(2));
    }

    #[test]
    fn test_rename_over_existing_field() {
        let mut row = Row::from(vec![("Name", "old"), ("Target", "x")]);
        row.rename("Name", "Target");
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Target"), &Value::from("old"));
    }
}
