//! In-memory item store.
//!
//! Serves as both the document store and the template catalog for the
//! binary and for tests. Documents are loaded from a JSON array file.

use std::path::Path;

use armoury_domain::{FieldChanges, ItemDocument, ItemId, TemplateCatalog, TemplateItem};
use async_trait::async_trait;
use dashmap::DashMap;
use tokio::fs;

use crate::infrastructure::ports::{ItemStore, RepoError};

/// Item documents keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: DashMap<ItemId, ItemDocument>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = ItemDocument>) -> Self {
        let store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    /// Load every document of a JSON array file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::unavailable("load_json", format!("{}: {}", path.display(), e)))?;
        let items: Vec<ItemDocument> = serde_json::from_str(&content)?;

        tracing::debug!(path = %path.display(), count = items.len(), "Loaded item catalog");
        Ok(Self::from_items(items))
    }

    pub fn insert(&self, item: ItemDocument) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of all documents, ordered by id.
    pub fn list(&self) -> Vec<ItemDocument> {
        let mut items: Vec<ItemDocument> =
            self.items.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn get(&self, id: &ItemId) -> Result<Option<ItemDocument>, RepoError> {
        Ok(self.items.get(id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: &ItemId, changes: FieldChanges) -> Result<(), RepoError> {
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| RepoError::not_found("Item", id))?;
        let updated = entry
            .with_changes(&changes)
            .map_err(RepoError::serialization)?;
        *entry = updated;
        Ok(())
    }
}

impl TemplateCatalog for InMemoryItemStore {
    fn resolve(&self, id: &ItemId) -> Option<TemplateItem> {
        self.items.get(id).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armoury_domain::ItemKind;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn update_merges_dotted_paths() {
        let store = InMemoryItemStore::from_items([ItemDocument::new(
            "W1",
            "Lasgun",
            ItemKind::Weapon,
        )]);
        let mut changes = FieldChanges::new();
        changes.insert("system.damage.base".into(), json!(7));

        store.update(&ItemId::new("W1"), changes).await.unwrap();

        let item = store.get(&ItemId::new("W1")).await.unwrap().unwrap();
        assert_eq!(item.system.get_path("damage.base"), Some(&json!(7)));
        assert_eq!(item.name, "Lasgun");
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let store = InMemoryItemStore::new();

        let err = store
            .update(&ItemId::new("nope"), FieldChanges::new())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn load_json_reads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!([
                { "_id": "T1", "name": "Lasgun", "type": "weapon", "system": { "category": "ranged" } },
                { "_id": "A1", "name": "Guardsman", "type": "archetype" }
            ])
        )
        .unwrap();

        let store = InMemoryItemStore::load_json(file.path()).await.unwrap();

        assert_eq!(store.len(), 2);
        let lasgun = store.resolve(&ItemId::new("T1")).unwrap();
        assert_eq!(lasgun.category(), Some("ranged"));
        assert_eq!(store.list()[0].id, ItemId::new("A1"));
    }

    #[tokio::test]
    async fn load_json_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = InMemoryItemStore::load_json(file.path()).await.unwrap_err();

        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn load_json_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = InMemoryItemStore::load_json(dir.path().join("missing.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Unavailable { .. }));
    }
}
