//! Item sheet submission use cases.

use std::sync::Arc;

use armoury_domain::{skill_list_changes, Archetype, ItemId, Record};

use crate::infrastructure::ports::ItemStore;
use crate::use_cases::wargear::SheetError;

/// Submits an item sheet form.
///
/// Only fields that differ from the stored item are written, so a
/// resubmitted sheet never stacks values onto the item.
pub struct SubmitItemForm {
    store: Arc<dyn ItemStore>,
}

impl SubmitItemForm {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// `form` is keyed like the stored document (`name`, `system.damage.base`).
    /// Returns whether anything was written.
    pub async fn execute(&self, item_id: &ItemId, form: &Record) -> Result<bool, SheetError> {
        let item = self
            .store
            .get(item_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(item_id.clone()))?;

        let changes = item.form_changes(form)?;
        if changes.is_empty() {
            tracing::debug!(item_id = %item_id, "Item form unchanged");
            return Ok(false);
        }

        let fields = changes.len();
        self.store.update(item_id, changes).await?;
        tracing::debug!(item_id = %item_id, fields, "Saved item form");
        Ok(true)
    }
}

/// Replaces the skills an archetype may spend experience on.
pub struct SetArchetypeSkills {
    store: Arc<dyn ItemStore>,
}

impl SetArchetypeSkills {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        archetype_id: &ItemId,
        skills: Vec<String>,
    ) -> Result<(), SheetError> {
        let item = self
            .store
            .get(archetype_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(archetype_id.clone()))?;
        // Owner check only; the wargear is not touched.
        Archetype::from_item(&item)?;

        let count = skills.len();
        self.store
            .update(archetype_id, skill_list_changes(skills))
            .await?;
        tracing::debug!(archetype_id = %archetype_id, skills = count, "Saved archetype skills");
        Ok(())
    }
}
