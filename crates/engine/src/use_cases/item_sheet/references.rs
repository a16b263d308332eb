//! Links between items: suggested talents, species abilities, the
//! archetype's faction/species/ability and journal entries.

use std::sync::Arc;

use armoury_domain::{
    DomainError, FieldChanges, ItemDocument, ItemId, ItemKind, ItemReference, ReferenceField,
    SheetList, ABILITIES_PATH, JOURNAL_PATH, SUGGESTED_TALENTS_PATH,
};
use serde_json::Value;

use crate::infrastructure::ports::ItemStore;
use crate::use_cases::wargear::SheetError;

pub struct EditReferences {
    store: Arc<dyn ItemStore>,
}

impl EditReferences {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Remove the link to `linked_id`: a suggested talent on an archetype or
    /// an ability on a species. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// - `InvalidOwner` for any other kind of item
    pub async fn remove_linked(&self, item_id: &ItemId, linked_id: &str) -> Result<bool, SheetError> {
        let item = self.item(item_id).await?;
        let path = match item.kind {
            ItemKind::Archetype => SUGGESTED_TALENTS_PATH,
            ItemKind::Species => ABILITIES_PATH,
            kind => return Err(DomainError::invalid_owner(item_id.clone(), kind).into()),
        };

        let mut list = SheetList::read(&item, path)?;
        if list.remove_by_id(linked_id).is_none() {
            tracing::debug!(item_id = %item_id, linked_id, "No link to remove");
            return Ok(false);
        }
        self.store.update(item_id, list.into_changes()).await?;
        tracing::info!(item_id = %item_id, linked_id, path, "Removed link");
        Ok(true)
    }

    /// Reset the archetype's `field` link to empty.
    pub async fn clear(&self, item_id: &ItemId, field: ReferenceField) -> Result<(), SheetError> {
        let item = self.item(item_id).await?;
        if !item.is_archetype() {
            return Err(DomainError::invalid_owner(item_id.clone(), item.kind).into());
        }
        self.store.update(item_id, field.clear_changes()).await?;
        tracing::info!(item_id = %item_id, field = field.path(), "Cleared link");
        Ok(())
    }

    /// Link a journal entry to an archetype, species or faction.
    /// Returns false, writing nothing, for other kinds.
    pub async fn link_journal(
        &self,
        target: &ItemDocument,
        journal_ref: &str,
    ) -> Result<bool, SheetError> {
        if !matches!(
            target.kind,
            ItemKind::Archetype | ItemKind::Species | ItemKind::Faction
        ) {
            return Ok(false);
        }
        let mut changes = FieldChanges::new();
        changes.insert(JOURNAL_PATH.to_string(), Value::String(journal_ref.to_string()));
        self.store.update(&target.id, changes).await?;
        tracing::info!(item_id = %target.id, journal_ref, "Linked journal entry");
        Ok(true)
    }

    /// Append `ability` to the species' ability list and return its index.
    /// An ability already listed is not added twice.
    pub async fn add_ability(
        &self,
        species: &ItemDocument,
        ability: &ItemDocument,
    ) -> Result<usize, SheetError> {
        let mut abilities = SheetList::read(species, ABILITIES_PATH)?;
        if let Some(index) = abilities.position_of(ability.id.as_str()) {
            return Ok(index);
        }
        let index = abilities.push(ItemReference::to(ability).to_value()) - 1;
        self.store.update(&species.id, abilities.into_changes()).await?;
        tracing::info!(species_id = %species.id, ability_id = %ability.id, index, "Added species ability");
        Ok(index)
    }

    async fn item(&self, item_id: &ItemId) -> Result<ItemDocument, SheetError> {
        self.store
            .get(item_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(item_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockItemStore;
    use armoury_domain::Record;
    use serde_json::json;

    fn species() -> ItemDocument {
        ItemDocument::new("S1", "Human", ItemKind::Species).with_system(
            Record::from_value(json!({
                "abilities": [{ "id": "AB1", "name": "Adaptable" }, { "id": "AB2", "name": "Stubborn" }]
            }))
            .unwrap(),
        )
    }

    fn archetype() -> ItemDocument {
        ItemDocument::new("A1", "Ministorum Priest", ItemKind::Archetype).with_system(
            Record::from_value(json!({
                "faction": { "id": "F1", "name": "Adeptus Ministorum" },
                "suggested": { "talents": { "list": [{ "id": "T1", "name": "Orthopraxy" }] } }
            }))
            .unwrap(),
        )
    }

    fn store_returning(item: ItemDocument) -> MockItemStore {
        let mut store = MockItemStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(item.clone())));
        store
    }

    #[tokio::test]
    async fn removing_a_suggested_talent_rewrites_the_list() {
        let mut store = store_returning(archetype());
        store
            .expect_update()
            .withf(|id, changes| id.as_str() == "A1" && changes[SUGGESTED_TALENTS_PATH] == json!([]))
            .times(1)
            .returning(|_, _| Ok(()));

        let removed = EditReferences::new(Arc::new(store))
            .remove_linked(&ItemId::new("A1"), "T1")
            .await
            .unwrap();

        assert!(removed);
    }

    #[tokio::test]
    async fn removing_a_species_ability_keeps_the_others() {
        let mut store = store_returning(species());
        store
            .expect_update()
            .withf(|_, changes| changes[ABILITIES_PATH] == json!([{ "id": "AB2", "name": "Stubborn" }]))
            .times(1)
            .returning(|_, _| Ok(()));

        let removed = EditReferences::new(Arc::new(store))
            .remove_linked(&ItemId::new("S1"), "AB1")
            .await
            .unwrap();

        assert!(removed);
    }

    #[tokio::test]
    async fn removing_an_unknown_link_writes_nothing() {
        let mut store = store_returning(species());
        store.expect_update().times(0);

        let removed = EditReferences::new(Arc::new(store))
            .remove_linked(&ItemId::new("S1"), "AB9")
            .await
            .unwrap();

        assert!(!removed);
    }

    #[tokio::test]
    async fn removing_links_from_a_weapon_fails() {
        let store = store_returning(ItemDocument::new("W1", "Lasgun", ItemKind::Weapon));

        let result = EditReferences::new(Arc::new(store))
            .remove_linked(&ItemId::new("W1"), "T1")
            .await;

        assert!(matches!(
            result,
            Err(SheetError::Domain(DomainError::InvalidOwner { .. }))
        ));
    }

    #[tokio::test]
    async fn clearing_the_faction_writes_an_empty_link() {
        let mut store = store_returning(archetype());
        store
            .expect_update()
            .withf(|_, changes| changes["system.faction"] == json!({ "id": "", "name": "" }))
            .times(1)
            .returning(|_, _| Ok(()));

        EditReferences::new(Arc::new(store))
            .clear(&ItemId::new("A1"), ReferenceField::Faction)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn journal_links_only_to_background_items() {
        let mut store = MockItemStore::new();
        store
            .expect_update()
            .withf(|id, changes| id.as_str() == "S1" && changes[JOURNAL_PATH] == json!("JournalEntry.j1"))
            .times(1)
            .returning(|_, _| Ok(()));
        let references = EditReferences::new(Arc::new(store));

        assert!(references.link_journal(&species(), "JournalEntry.j1").await.unwrap());
        let weapon = ItemDocument::new("W1", "Lasgun", ItemKind::Weapon);
        assert!(!references.link_journal(&weapon, "JournalEntry.j1").await.unwrap());
    }

    #[tokio::test]
    async fn ability_is_added_once() {
        let mut store = MockItemStore::new();
        store
            .expect_update()
            .withf(|_, changes| changes[ABILITIES_PATH][2] == json!({ "id": "AB3", "name": "Hardy" }))
            .times(1)
            .returning(|_, _| Ok(()));
        let references = EditReferences::new(Arc::new(store));

        let hardy = ItemDocument::new("AB3", "Hardy", ItemKind::Ability);
        assert_eq!(references.add_ability(&species(), &hardy).await.unwrap(), 2);

        let adaptable = ItemDocument::new("AB1", "Adaptable", ItemKind::Ability);
        assert_eq!(references.add_ability(&species(), &adaptable).await.unwrap(), 0);
    }
}
