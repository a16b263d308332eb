//! Potency list use cases.

use std::sync::Arc;

use armoury_domain::{FieldChanges, ItemDocument, ItemId, PotencyList, POTENCY_PATH};
use serde_json::Value;

use crate::infrastructure::ports::ItemStore;
use crate::use_cases::wargear::SheetError;

/// Adds, edits and deletes potency entries. Every write replaces the list.
pub struct EditPotency {
    store: Arc<dyn ItemStore>,
}

impl EditPotency {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Append a blank entry. Returns the new list length.
    pub async fn add(&self, item_id: &ItemId) -> Result<usize, SheetError> {
        let mut potency = self.load(item_id).await?;
        potency.push_default();
        let len = potency.len();
        self.save(item_id, potency).await?;
        Ok(len)
    }

    /// Set `path` of entry `index`; numeric strings are stored as numbers.
    pub async fn update(
        &self,
        item_id: &ItemId,
        index: usize,
        path: &str,
        value: Value,
    ) -> Result<(), SheetError> {
        let mut potency = self.load(item_id).await?;
        potency.update(index, path, value)?;
        self.save(item_id, potency).await
    }

    pub async fn delete(&self, item_id: &ItemId, index: usize) -> Result<(), SheetError> {
        let mut potency = self.load(item_id).await?;
        potency.remove(index)?;
        self.save(item_id, potency).await
    }

    async fn load(&self, item_id: &ItemId) -> Result<PotencyList, SheetError> {
        let item: ItemDocument = self
            .store
            .get(item_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(item_id.clone()))?;
        Ok(PotencyList::from_system(&item.system))
    }

    async fn save(&self, item_id: &ItemId, potency: PotencyList) -> Result<(), SheetError> {
        let entries = potency.len();
        let mut changes = FieldChanges::new();
        changes.insert(POTENCY_PATH.to_string(), potency.into_value());
        self.store.update(item_id, changes).await?;
        tracing::debug!(item_id = %item_id, entries, "Saved potency");
        Ok(())
    }
}
