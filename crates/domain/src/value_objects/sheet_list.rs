//! Arrays and links edited in place on item sheets.
//!
//! Backgrounds, objectives, suggested talents and species abilities are
//! plain arrays on the document. Like potency, every edit produces the full
//! replacement array for its path.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entities::ItemDocument;
use crate::error::DomainError;
use crate::value_objects::FieldChanges;

/// Journal entry linked from an archetype, species or faction
pub const JOURNAL_PATH: &str = "system.journal";

/// Talents an archetype suggests
pub const SUGGESTED_TALENTS_PATH: &str = "system.suggested.talents.list";

/// Abilities granted by a species
pub const ABILITIES_PATH: &str = "system.abilities";

/// Objectives of a faction or archetype
pub const OBJECTIVES_PATH: &str = "system.objectives";

/// A stored link to another item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub id: String,
    pub name: String,
}

impl ItemReference {
    pub fn to(item: &ItemDocument) -> Self {
        Self {
            id: item.id.as_str().to_string(),
            name: item.name.clone(),
        }
    }

    /// A cleared link, stored as `{id: "", name: ""}`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_value(&self) -> Value {
        json!({ "id": self.id, "name": self.name })
    }
}

/// Single links on an archetype that the sheet can clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceField {
    Ability,
    Faction,
    Species,
}

impl ReferenceField {
    pub fn path(self) -> &'static str {
        match self {
            Self::Ability => "system.ability",
            Self::Faction => "system.faction",
            Self::Species => "system.species",
        }
    }

    pub fn clear_changes(self) -> FieldChanges {
        let mut changes = FieldChanges::new();
        changes.insert(self.path().to_string(), ItemReference::empty().to_value());
        changes
    }
}

/// Editable copy of an array stored at a document path
#[derive(Debug, Clone, PartialEq)]
pub struct SheetList {
    path: String,
    entries: Vec<Value>,
}

impl SheetList {
    /// Read the array at `path` (e.g. `system.objectives`); missing means empty.
    ///
    /// # Errors
    ///
    /// - `Validation` if `path` holds something other than an array
    pub fn read(item: &ItemDocument, path: &str) -> Result<Self, DomainError> {
        let document = item.to_record()?;
        let entries = match document.get_path(path) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries.clone(),
            Some(_) => {
                return Err(DomainError::validation(format!(
                    "{path} of {} is not a list",
                    item.id
                )))
            }
        };
        Ok(Self {
            path: path.to_string(),
            entries,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.entries.get(index)
    }

    /// Append `entry`; returns the new length.
    pub fn push(&mut self, entry: Value) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    /// Append the blank entry for this kind of list: an empty string for
    /// objectives, an empty `{name, description, effect}` for backgrounds.
    pub fn push_blank(&mut self) -> Result<usize, DomainError> {
        let blank = if self.path.contains("backgrounds") {
            json!({ "name": "", "description": "", "effect": "" })
        } else if self.path.contains("objectives") {
            Value::String(String::new())
        } else {
            return Err(DomainError::validation(format!(
                "{} has no blank entry",
                self.path
            )));
        };
        Ok(self.push(blank))
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result<(), DomainError> {
        *self.entry_mut(index)? = value;
        Ok(())
    }

    /// Set `field` of the object at `index`.
    pub fn set_field(&mut self, index: usize, field: &str, value: Value) -> Result<(), DomainError> {
        let path = self.path.clone();
        match self.entry_mut(index)? {
            Value::Object(entry) => {
                entry.insert(field.to_string(), value);
                Ok(())
            }
            _ => Err(DomainError::validation(format!(
                "Entry {index} of {path} is not an object"
            ))),
        }
    }

    /// Flip `field` of the object at `index`; returns the new value.
    ///
    /// A missing or falsy field becomes `true`.
    pub fn toggle(&mut self, index: usize, field: &str) -> Result<bool, DomainError> {
        let current = self
            .entry_mut(index)?
            .get(field)
            .is_some_and(is_truthy);
        self.set_field(index, field, Value::Bool(!current))?;
        Ok(!current)
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, DomainError> {
        if index >= self.entries.len() {
            return Err(DomainError::index_out_of_range(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    /// Remove the first entry linking to `id`.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Value> {
        let index = self.position_of(id)?;
        Some(self.entries.remove(index))
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
    }

    /// Drop blank entries; objectives are deleted by clearing their text.
    pub fn retain_filled(&mut self) {
        self.entries.retain(is_truthy);
    }

    pub fn into_changes(self) -> FieldChanges {
        let mut changes = FieldChanges::new();
        changes.insert(self.path, Value::Array(self.entries));
        changes
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut Value, DomainError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(DomainError::index_out_of_range(index, len))
    }
}

/// The change flipping the flag at document path `target`, with its new value.
pub fn toggle_changes(item: &ItemDocument, target: &str) -> Result<(FieldChanges, bool), DomainError> {
    let current = item.to_record()?.get_path(target).is_some_and(is_truthy);
    let mut changes = FieldChanges::new();
    changes.insert(target.to_string(), Value::Bool(!current));
    Ok((changes, !current))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
