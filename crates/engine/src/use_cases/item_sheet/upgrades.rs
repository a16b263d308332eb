//! Weapon upgrade use cases.

use std::sync::Arc;

use armoury_domain::{FieldChanges, ItemDocument, ItemId, UPGRADES_PATH};
use serde_json::Value;

use crate::infrastructure::ports::{IdGenerator, ItemStore};
use crate::use_cases::wargear::SheetError;

/// Applies an upgrade document to a weapon.
///
/// The weapon receives a copy of the upgrade under a fresh id, so the same
/// upgrade can be applied more than once.
pub struct ApplyUpgrade {
    store: Arc<dyn ItemStore>,
    random: Arc<dyn IdGenerator>,
}

impl ApplyUpgrade {
    pub fn new(store: Arc<dyn ItemStore>, random: Arc<dyn IdGenerator>) -> Self {
        Self { store, random }
    }

    /// Returns the id given to the applied copy.
    pub async fn execute(
        &self,
        weapon: &ItemDocument,
        upgrade: &ItemDocument,
    ) -> Result<String, SheetError> {
        let copy_id = self.random.gen_document_id();
        let upgrades = weapon.with_upgrade(upgrade, copy_id.clone())?;
        self.store
            .update(&weapon.id, upgrades_changes(upgrades))
            .await?;

        tracing::info!(
            weapon_id = %weapon.id,
            upgrade = %upgrade.name,
            copy_id = %copy_id,
            "Upgrade applied to {}",
            weapon.name
        );
        Ok(copy_id)
    }
}

/// Removes an applied upgrade from a weapon by position.
pub struct RemoveUpgrade {
    store: Arc<dyn ItemStore>,
}

impl RemoveUpgrade {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, weapon_id: &ItemId, index: usize) -> Result<(), SheetError> {
        let weapon = self
            .store
            .get(weapon_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(weapon_id.clone()))?;

        let upgrades = weapon.without_upgrade(index)?;
        self.store
            .update(weapon_id, upgrades_changes(upgrades))
            .await?;

        tracing::debug!(weapon_id = %weapon_id, index, "Removed upgrade");
        Ok(())
    }
}

fn upgrades_changes(upgrades: Vec<Value>) -> FieldChanges {
    let mut changes = FieldChanges::new();
    changes.insert(UPGRADES_PATH.to_string(), Value::Array(upgrades));
    changes
}
