//! Item documents - catalog entries owned by the host
//!
//! Templates, archetypes and weapon upgrades are all item documents. The
//! engine reads templates and never mutates them; changes to a document are
//! expressed as dotted-path [`FieldChanges`] that the host merges in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::ids::ItemId;
use crate::value_objects::{compute_patch, FieldChanges, Record};

/// Path of a weapon's upgrade list
pub const UPGRADES_PATH: &str = "system.upgrades";

/// An item document as stored by the host
///
/// This is a data-carrying struct: the host accepts any combination of
/// values, so all fields are public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Type-specific data (`damage`, `range`, `wargear`, ...)
    #[serde(default)]
    pub system: Record,
}

/// Template items are plain documents seen through the catalog
pub type TemplateItem = ItemDocument;

impl ItemDocument {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            system: Record::new(),
        }
    }

    pub fn with_system(mut self, system: Record) -> Self {
        self.system = system;
        self
    }

    /// The record a wargear override is diffed against: `system` with the
    /// document's `name` at the top level.
    pub fn record(&self) -> Record {
        let mut record = self.system.clone();
        record.set_path("name", Value::String(self.name.clone()));
        record
    }

    pub fn is_archetype(&self) -> bool {
        self.kind == ItemKind::Archetype
    }

    /// Weapon category (`melee`, `ranged`, `grenade-missile`)
    pub fn category(&self) -> Option<&str> {
        self.system.get_path("category").and_then(Value::as_str)
    }

    pub fn is_melee(&self) -> bool {
        self.category() == Some("melee")
    }

    /// Whether the weapon's range is a single value or a short/medium/long band.
    pub fn range_type(&self) -> RangeType {
        if self.is_melee() || self.category() == Some("grenade-missile") {
            RangeType::Single
        } else {
            RangeType::Multi
        }
    }

    /// The whole document as a JSON record (`_id`, `name`, `type`, `system`).
    pub fn to_record(&self) -> Result<Record, DomainError> {
        Record::from_value(serde_json::to_value(self)?)
    }

    /// Fields of a submitted form that differ from this document.
    ///
    /// Unchanged fields are left out so that resubmitting a sheet does not
    /// stack values (upgrades, modifiers) onto the stored item.
    pub fn form_changes(&self, form: &Record) -> Result<FieldChanges, DomainError> {
        let current = self.to_record()?;
        Ok(compute_patch(&current, form).to_field_map())
    }

    /// A copy of this document with `changes` merged in.
    pub fn with_changes(&self, changes: &FieldChanges) -> Result<Self, DomainError> {
        let mut record = self.to_record()?;
        for (path, value) in changes {
            record.set_path(path, value.clone());
        }
        Ok(serde_json::from_value(record.into_value())?)
    }

    /// The weapon's upgrade list (copies of upgrade documents).
    pub fn upgrades(&self) -> Vec<Value> {
        self.system
            .get_path("upgrades")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// The upgrade list with a copy of `upgrade` appended under a fresh `_id`.
    pub fn with_upgrade(
        &self,
        upgrade: &ItemDocument,
        new_id: impl Into<String>,
    ) -> Result<Vec<Value>, DomainError> {
        if self.kind != ItemKind::Weapon {
            return Err(DomainError::validation(format!(
                "Upgrades can only be applied to weapons, not {}",
                self.kind
            )));
        }
        if upgrade.kind != ItemKind::WeaponUpgrade {
            return Err(DomainError::validation(format!(
                "{} is a {}, not a weapon upgrade",
                upgrade.name, upgrade.kind
            )));
        }

        let mut copy = upgrade.to_record()?;
        copy.set_path("_id", Value::String(new_id.into()));

        let mut upgrades = self.upgrades();
        upgrades.push(copy.into_value());
        Ok(upgrades)
    }

    /// The upgrade list without the entry at `index`.
    pub fn without_upgrade(&self, index: usize) -> Result<Vec<Value>, DomainError> {
        let mut upgrades = self.upgrades();
        if index >= upgrades.len() {
            return Err(DomainError::index_out_of_range(index, upgrades.len()));
        }
        upgrades.remove(index);
        Ok(upgrades)
    }
}

/// Kind of item document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    WeaponUpgrade,
    Ammo,
    Armour,
    Gear,
    Augmetic,
    Archetype,
    Species,
    Faction,
    Talent,
    Ability,
    PsychicPower,
    Keyword,
    /// Inline wargear entry with no template behind it
    Generic,
    /// Unknown type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::WeaponUpgrade => write!(f, "weaponUpgrade"),
            Self::Ammo => write!(f, "ammo"),
            Self::Armour => write!(f, "armour"),
            Self::Gear => write!(f, "gear"),
            Self::Augmetic => write!(f, "augmetic"),
            Self::Archetype => write!(f, "archetype"),
            Self::Species => write!(f, "species"),
            Self::Faction => write!(f, "faction"),
            Self::Talent => write!(f, "talent"),
            Self::Ability => write!(f, "ability"),
            Self::PsychicPower => write!(f, "psychicPower"),
            Self::Keyword => write!(f, "keyword"),
            Self::Generic => write!(f, "generic"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// How a weapon's range is entered on its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    Single,
    Multi,
}
