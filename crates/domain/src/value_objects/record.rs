//! Item data records addressed by dotted field paths.
//!
//! A record is a JSON object. Nested objects are reached with dotted paths
//! (`damage.base`); arrays, scalars, `null` and empty objects are leaves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;

/// Separator between the segments of a field path
pub const PATH_SEPARATOR: char = '.';

/// Dotted-path keyed changes, as merged into a document by the host
pub type FieldChanges = BTreeMap<String, Value>;

/// A JSON object holding an item's data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::validation(format!(
                "Expected a JSON object for a record, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Rebuild a nested record from flattened `path -> value` leaves.
    pub fn expand<I, K>(leaves: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut record = Self::new();
        for (path, value) in leaves {
            record.set_path(path.as_ref(), value);
        }
        record
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The record's top-level `name`, when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Look up the value at a dotted path.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Write `value` at a dotted path, creating (or replacing non-object)
    /// intermediate values as needed.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut current = &mut self.0;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    /// Remove the value at a dotted path.
    ///
    /// Parent objects emptied by the removal are removed as well, so that a
    /// removed leaf does not leave a `{}` behind.
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        remove_in(&mut self.0, &segments)
    }

    /// Flatten into `path -> leaf` pairs, ordered by path.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        let mut leaves = BTreeMap::new();
        flatten_into(&self.0, None, &mut leaves);
        leaves
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

fn remove_in(map: &mut Map<String, Value>, segments: &[&str]) -> Option<Value> {
    match segments {
        [] => None,
        [last] => map.remove(*last),
        [head, rest @ ..] => {
            let child = map.get_mut(*head)?.as_object_mut()?;
            let removed = remove_in(child, rest)?;
            if child.is_empty() {
                map.remove(*head);
            }
            Some(removed)
        }
    }
}

fn flatten_into(map: &Map<String, Value>, prefix: Option<&str>, out: &mut BTreeMap<String, Value>) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{PATH_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(child) if !child.is_empty() => flatten_into(child, Some(&path), out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
