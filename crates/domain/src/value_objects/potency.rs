//! Potency entries of psychic powers and abilities.
//!
//! The host stores potency as a plain array under `system.potency`; every
//! edit produces the full replacement array.

use serde_json::{json, Number, Value};

use crate::error::DomainError;
use crate::value_objects::Record;

/// Path of the potency list on an item
pub const POTENCY_PATH: &str = "system.potency";

/// Editable copy of an item's potency list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PotencyList(Vec<Value>);

impl PotencyList {
    /// Read the list from an item's `system` record (missing means empty).
    pub fn from_system(system: &Record) -> Self {
        Self(
            system
                .get_path("potency")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Append a blank entry costing one.
    pub fn push_default(&mut self) {
        self.0.push(json!({
            "description": "",
            "cost": 1,
            "property": "",
            "initial": "",
            "value": "",
            "single": false
        }));
    }

    /// Set `path` of entry `index`. Numeric strings are stored as numbers.
    pub fn update(&mut self, index: usize, path: &str, value: Value) -> Result<(), DomainError> {
        let len = self.0.len();
        let entry = self
            .0
            .get_mut(index)
            .ok_or(DomainError::index_out_of_range(index, len))?;

        let mut record = Record::from_value(entry.clone())?;
        record.set_path(path, coerce_numeric(value));
        *entry = record.into_value();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, DomainError> {
        if index >= self.0.len() {
            return Err(DomainError::index_out_of_range(index, self.0.len()));
        }
        Ok(self.0.remove(index))
    }

    pub fn into_value(self) -> Value {
        Value::Array(self.0)
    }
}

/// Form inputs arrive as strings; store `"3"` as `3`, keep everything else.
fn coerce_numeric(value: Value) -> Value {
    let Value::String(text) = &value else {
        return value;
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return value;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => value,
    }
}
