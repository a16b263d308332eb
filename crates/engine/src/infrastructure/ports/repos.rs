//! Repository port traits for document access.

use armoury_domain::{FieldChanges, ItemDocument, ItemId};
use async_trait::async_trait;

use super::error::RepoError;

// =============================================================================
// Item Storage
// =============================================================================

/// The host's item document store.
///
/// `update` merges dotted-path changes into the stored document. Arrays are
/// always supplied whole; the store never patches individual elements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn get(&self, id: &ItemId) -> Result<Option<ItemDocument>, RepoError>;
    async fn update(&self, id: &ItemId, changes: FieldChanges) -> Result<(), RepoError>;
}
