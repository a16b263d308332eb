//! Background, objective and checkbox edits.

use std::sync::Arc;

use armoury_domain::{toggle_changes, ItemDocument, ItemId, SheetList, OBJECTIVES_PATH};
use serde_json::Value;

use crate::infrastructure::ports::ItemStore;
use crate::use_cases::wargear::SheetError;

/// Edits list fields of an item sheet. Every write replaces the whole list.
pub struct EditSheetLists {
    store: Arc<dyn ItemStore>,
}

impl EditSheetLists {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Append a blank background or objective to the list at `path`.
    /// Returns the new list length.
    pub async fn add_entry(&self, item_id: &ItemId, path: &str) -> Result<usize, SheetError> {
        let mut list = self.load(item_id, path).await?;
        let len = list.push_blank()?;
        self.save(item_id, list).await?;
        Ok(len)
    }

    /// Set `field` (`name`, `description`, `effect`) of background `index`.
    pub async fn update_entry(
        &self,
        item_id: &ItemId,
        path: &str,
        index: usize,
        field: &str,
        value: Value,
    ) -> Result<(), SheetError> {
        let mut list = self.load(item_id, path).await?;
        list.set_field(index, field, value)?;
        self.save(item_id, list).await
    }

    pub async fn delete_entry(
        &self,
        item_id: &ItemId,
        path: &str,
        index: usize,
    ) -> Result<(), SheetError> {
        let mut list = self.load(item_id, path).await?;
        list.remove(index)?;
        self.save(item_id, list).await
    }

    /// Replace objective `index`. Objectives left blank are removed.
    /// Returns the number of objectives kept.
    pub async fn update_objective(
        &self,
        item_id: &ItemId,
        index: usize,
        text: &str,
    ) -> Result<usize, SheetError> {
        let mut objectives = self.load(item_id, OBJECTIVES_PATH).await?;
        objectives.set(index, Value::String(text.to_string()))?;
        objectives.retain_filled();
        let kept = objectives.len();
        self.save(item_id, objectives).await?;
        Ok(kept)
    }

    /// Flip the checkbox `field` of entry `index` in the list at `path`.
    pub async fn toggle_entry(
        &self,
        item_id: &ItemId,
        path: &str,
        index: usize,
        field: &str,
    ) -> Result<bool, SheetError> {
        let mut list = self.load(item_id, path).await?;
        let checked = list.toggle(index, field)?;
        self.save(item_id, list).await?;
        Ok(checked)
    }

    /// Flip the checkbox stored directly at `target`.
    pub async fn toggle_flag(&self, item_id: &ItemId, target: &str) -> Result<bool, SheetError> {
        let item = self.item(item_id).await?;
        let (changes, checked) = toggle_changes(&item, target)?;
        self.store.update(item_id, changes).await?;
        tracing::debug!(item_id = %item_id, target, checked, "Toggled flag");
        Ok(checked)
    }

    async fn item(&self, item_id: &ItemId) -> Result<ItemDocument, SheetError> {
        self.store
            .get(item_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(item_id.clone()))
    }

    async fn load(&self, item_id: &ItemId, path: &str) -> Result<SheetList, SheetError> {
        let item = self.item(item_id).await?;
        Ok(SheetList::read(&item, path)?)
    }

    async fn save(&self, item_id: &ItemId, list: SheetList) -> Result<(), SheetError> {
        let path = list.path().to_string();
        let entries = list.len();
        self.store.update(item_id, list.into_changes()).await?;
        tracing::debug!(item_id = %item_id, path, entries, "Saved sheet list");
        Ok(())
    }
}
