//! Attach wargear use case.
//!
//! Adds a templated or generic slot to the end of an archetype's wargear.

use std::sync::Arc;

use armoury_domain::{ItemDocument, ItemId, Record};

use super::error::SheetError;
use super::sheet::WargearSheet;

/// Attach wargear use case.
pub struct AttachWargear {
    sheet: Arc<WargearSheet>,
}

impl AttachWargear {
    pub fn new(sheet: Arc<WargearSheet>) -> Self {
        Self { sheet }
    }

    /// Attach the catalog template `template_id`. Returns the new slot's index.
    pub async fn execute(
        &self,
        archetype_id: &ItemId,
        template_id: &ItemId,
    ) -> Result<usize, SheetError> {
        let template = self.sheet.template(template_id)?;
        self.attach_item(archetype_id, &template).await
    }

    /// Attach an item document that is already in hand (a drop).
    pub async fn attach_item(
        &self,
        archetype_id: &ItemId,
        template: &ItemDocument,
    ) -> Result<usize, SheetError> {
        let mut archetype = self.sheet.load(archetype_id).await?;
        let index = archetype.attach(template);
        self.sheet.save_structure(&mut archetype).await?;

        tracing::info!(
            archetype_id = %archetype_id,
            template_id = %template.id,
            index,
            "Attached wargear"
        );
        Ok(index)
    }

    /// Attach a generic slot holding `initial` as its record.
    pub async fn execute_generic(
        &self,
        archetype_id: &ItemId,
        initial: Record,
    ) -> Result<usize, SheetError> {
        let mut archetype = self.sheet.load(archetype_id).await?;
        let index = archetype.attach_generic(&initial);
        self.sheet.save_structure(&mut archetype).await?;

        tracing::info!(archetype_id = %archetype_id, index, "Attached generic wargear");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockItemStore, RepoError};
    use crate::use_cases::wargear::sheet::test_support::*;
    use armoury_domain::{Archetype, ItemDocument, WARGEAR_PATH};
    use serde_json::json;

    fn use_case(store: MockItemStore) -> AttachWargear {
        let catalog = catalog(&[weapon("T1", "Lasgun"), weapon("T2", "Knife")]);
        AttachWargear::new(Arc::new(WargearSheet::new(
            Arc::new(store),
            Arc::new(catalog),
            true,
        )))
    }

    fn stored_archetype(store: &mut MockItemStore, item: ItemDocument) {
        store
            .expect_get()
            .withf(|id| id.as_str() == "A1")
            .returning(move |_| Ok(Some(item.clone())));
    }

    #[tokio::test]
    async fn attach_appends_slot_and_persists_full_list() {
        let mut store = MockItemStore::new();
        stored_archetype(&mut store, archetype("A1"));
        store
            .expect_update()
            .withf(|id, changes| {
                let slots = changes[WARGEAR_PATH].as_array().unwrap();
                id.as_str() == "A1"
                    && slots.len() == 1
                    && slots[0]["type"] == json!("templated")
                    && slots[0]["id"] == json!("T1")
                    && slots[0]["name"] == json!("Lasgun")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let index = use_case(store)
            .execute(&ItemId::new("A1"), &ItemId::new("T1"))
            .await
            .unwrap();

        assert_eq!(index, 0);
    }

    #[tokio::test]
    async fn attach_after_existing_slots_returns_next_index() {
        let mut existing = Archetype::from_item(&archetype("A1")).unwrap();
        existing.attach(&weapon("T1", "Lasgun"));
        let stored = archetype("A1")
            .with_changes(&existing.wargear_changes().unwrap())
            .unwrap();

        let mut store = MockItemStore::new();
        stored_archetype(&mut store, stored);
        store.expect_update().times(1).returning(|_, _| Ok(()));

        let index = use_case(store)
            .execute(&ItemId::new("A1"), &ItemId::new("T2"))
            .await
            .unwrap();

        assert_eq!(index, 1);
    }

    #[tokio::test]
    async fn attach_unknown_template_is_item_not_found() {
        let store = MockItemStore::new();

        let result = use_case(store)
            .execute(&ItemId::new("A1"), &ItemId::new("missing"))
            .await;

        assert!(matches!(result, Err(SheetError::ItemNotFound(id)) if id.as_str() == "missing"));
    }

    #[tokio::test]
    async fn attach_generic_stores_record_as_diff() {
        let mut store = MockItemStore::new();
        stored_archetype(&mut store, archetype("A1"));
        store
            .expect_update()
            .withf(|_, changes| {
                let slot = &changes[WARGEAR_PATH][0];
                slot["type"] == json!("generic") && slot["name"] == json!("Rations")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let initial = Record::from_value(json!({ "name": "Rations", "quantity": 3 })).unwrap();
        let index = use_case(store)
            .execute_generic(&ItemId::new("A1"), initial)
            .await
            .unwrap();

        assert_eq!(index, 0);
    }

    #[tokio::test]
    async fn persistence_failure_propagates() {
        let mut store = MockItemStore::new();
        stored_archetype(&mut store, archetype("A1"));
        store
            .expect_update()
            .returning(|_, _| Err(RepoError::unavailable("update", "unavailable")));

        let result = use_case(store)
            .execute(&ItemId::new("A1"), &ItemId::new("T1"))
            .await;

        assert!(matches!(result, Err(SheetError::Persistence(_))));
    }
}
