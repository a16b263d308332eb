//! Loading and saving archetypes through the item store.

use std::sync::Arc;

use armoury_domain::{Archetype, FieldChanges, ItemDocument, ItemId, TemplateCatalog};

use crate::infrastructure::ports::ItemStore;

use super::error::SheetError;

/// Shared access to archetypes for the wargear use cases.
pub struct WargearSheet {
    store: Arc<dyn ItemStore>,
    catalog: Arc<dyn TemplateCatalog + Send + Sync>,
    auto_reset_groups: bool,
}

impl WargearSheet {
    pub fn new(
        store: Arc<dyn ItemStore>,
        catalog: Arc<dyn TemplateCatalog + Send + Sync>,
        auto_reset_groups: bool,
    ) -> Self {
        Self {
            store,
            catalog,
            auto_reset_groups,
        }
    }

    pub fn catalog(&self) -> &dyn TemplateCatalog {
        self.catalog.as_ref()
    }

    pub async fn get_item(&self, id: &ItemId) -> Result<ItemDocument, SheetError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(id.clone()))
    }

    /// Resolve a template through the catalog.
    pub fn template(&self, id: &ItemId) -> Result<ItemDocument, SheetError> {
        self.catalog
            .resolve(id)
            .ok_or_else(|| SheetError::ItemNotFound(id.clone()))
    }

    /// Load an archetype, writing back slot ids generated for stored slots
    /// that had none.
    pub async fn load(&self, id: &ItemId) -> Result<Archetype, SheetError> {
        let item = self.get_item(id).await?;
        let archetype = Archetype::from_item(&item)?;
        if archetype.has_unsaved_slot_ids() {
            tracing::info!(archetype_id = %id, "Assigning ids to stored wargear slots");
            self.save_wargear(&archetype).await?;
        }
        Ok(archetype)
    }

    /// Persist the wargear list after an attach or remove.
    ///
    /// With auto reset on, the default grouping is rebuilt and written in
    /// the same update. Otherwise the stored grouping is left alone and
    /// reloads as stale.
    pub async fn save_structure(&self, archetype: &mut Archetype) -> Result<(), SheetError> {
        if self.auto_reset_groups {
            archetype.reset_groups();
        }
        let mut changes = archetype.wargear_changes()?;
        if let Some(groups) = archetype.group_changes()? {
            changes.extend(groups);
        }
        self.write(archetype.id(), changes).await
    }

    /// Persist the wargear list after a diff edit or rename.
    pub async fn save_wargear(&self, archetype: &Archetype) -> Result<(), SheetError> {
        let changes = archetype.wargear_changes()?;
        self.write(archetype.id(), changes).await
    }

    /// Persist the grouping; a stale grouping is never written.
    pub async fn save_groups(&self, archetype: &Archetype) -> Result<bool, SheetError> {
        match archetype.group_changes()? {
            Some(changes) => {
                self.write(archetype.id(), changes).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn write(&self, id: &ItemId, changes: FieldChanges) -> Result<(), SheetError> {
        self.store.update(id, changes).await?;
        Ok(())
    }
}
