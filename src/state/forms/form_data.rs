//! Shared form data accumulated by a wizard across all of its steps

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single entry of a record list (one education or experience item)
pub type Record = BTreeMap<String, String>;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(i64),
    List(Vec<String>),
    Records(Vec<Record>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether the value counts as "not filled in".
    /// An unchecked flag is empty; a number never is.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Number(_) => false,
            FieldValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
            FieldValue::Records(records) => records.is_empty(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(true) => "yes".to_string(),
            FieldValue::Flag(false) => "no".to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Records(records) => format!("{} entries", records.len()),
        }
    }

    /// Plain JSON representation used for backend payloads
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.trim().to_string()),
            FieldValue::Flag(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::from(*n),
            FieldValue::List(items) => Value::from(items.clone()),
            FieldValue::Records(records) => Value::Array(
                records
                    .iter()
                    .map(|r| {
                        Value::Object(
                            r.iter()
                                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

/// Field-name to value mapping shared by every step of a wizard.
///
/// Updates are merge-only: a partial update replaces the fields it names and
/// leaves everything else untouched. Record lists are replaced wholesale, so
/// editing a single entry means reading, modifying and writing the full list
/// (see [`FormData::append_record`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Present and not empty
    pub fn is_set(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Text value (empty string for missing or non-text fields)
    pub fn text(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(FieldValue::Flag(true)))
    }

    /// Numeric value; text that parses as an integer counts too
    pub fn number(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(FieldValue::Number(n)) => Some(*n),
            Some(FieldValue::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> &[String] {
        match self.fields.get(key) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn records(&self, key: &str) -> &[Record] {
        match self.fields.get(key) {
            Some(FieldValue::Records(records)) => records,
            _ => &[],
        }
    }

    /// Set a single field
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    /// Shallow merge of a partial update. Returns the names of the fields
    /// whose value actually changed.
    pub fn merge(&mut self, partial: FormData) -> Vec<String> {
        let mut changed = Vec::new();
        for (key, value) in partial.fields {
            if self.fields.get(&key) != Some(&value) {
                changed.push(key.clone());
                self.fields.insert(key, value);
            }
        }
        changed
    }

    /// Append one record to a record list (read-modify-write of the whole list)
    pub fn append_record(&mut self, key: &str, record: Record) {
        let mut records = self.records(key).to_vec();
        records.push(record);
        self.set(key, FieldValue::Records(records));
    }

    /// Remove the last record of a record list
    pub fn remove_last_record(&mut self, key: &str) -> Option<Record> {
        let mut records = self.records(key).to_vec();
        let removed = records.pop();
        if removed.is_some() {
            self.set(key, FieldValue::Records(records));
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flattened JSON object with plain values, as sent to the backend
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Subset of this data restricted to the given keys
    pub fn pick(&self, keys: &[&str]) -> FormData {
        keys.iter()
            .filter_map(|k| self.fields.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Build a record from sub-field pairs
pub fn record<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Record {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
