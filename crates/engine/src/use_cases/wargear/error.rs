//! Sheet operation errors.

use crate::infrastructure::ports::RepoError;
use armoury_domain::{DomainError, ItemId};

/// Errors that can occur during sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] RepoError),
}
