//! Unified error types for the domain layer
//!
//! Every wargear, grouping and diff operation reports failures through
//! [`DomainError`], so the engine can map them without inspecting strings.
//! Dangling template references are not errors; they project to a placeholder.

use thiserror::Error;

use crate::ids::{ItemId, SlotId};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Slot index no longer valid - callers must re-fetch the wargear list
    #[error("Slot index {index} out of range (wargear has {len} slots)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Slot identifier does not belong to the wargear list (e.g. removed meanwhile)
    #[error("Unknown wargear slot: {0}")]
    UnknownSlot(SlotId),

    /// Slot edit attempted while the slot's template is missing from the catalog
    #[error("Template {template_id} of wargear slot {slot_id} is missing")]
    MissingTemplate { slot_id: SlotId, template_id: ItemId },

    /// Wargear mutation attempted on an item that is not an archetype
    #[error("Item {id} is a {kind}, not an archetype")]
    InvalidOwner { id: ItemId, kind: String },

    /// Grouping violates the coverage/disjointness invariant
    #[error("Invalid grouping: {0}")]
    InvalidPartition(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stored document data could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an invalid owner error for an item of the given kind.
    pub fn invalid_owner(id: ItemId, kind: impl ToString) -> Self {
        Self::InvalidOwner {
            id,
            kind: kind.to_string(),
        }
    }

    pub fn missing_template(slot_id: SlotId, template_id: ItemId) -> Self {
        Self::MissingTemplate {
            slot_id,
            template_id,
        }
    }

    /// Creates an invalid partition error.
    ///
    /// Use this when a grouping does not cover the wargear list exactly once:
    /// - A slot is missing from every group
    /// - A slot appears in two groups
    /// - A group names a slot the archetype does not have
    pub fn invalid_partition(msg: impl Into<String>) -> Self {
        Self::InvalidPartition(msg.into())
    }

    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl ToString) -> Self {
        Self::Serialization(msg.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_error() {
        let err = DomainError::index_out_of_range(3, 2);
        assert!(matches!(err, DomainError::IndexOutOfRange { index: 3, len: 2 }));
        assert_eq!(
            err.to_string(),
            "Slot index 3 out of range (wargear has 2 slots)"
        );
    }

    #[test]
    fn test_invalid_owner_error() {
        let err = DomainError::invalid_owner(ItemId::new("abc123"), "weapon");
        assert!(matches!(err, DomainError::InvalidOwner { .. }));
        assert_eq!(err.to_string(), "Item abc123 is a weapon, not an archetype");
    }

    #[test]
    fn test_missing_template_error() {
        let slot_id = SlotId::new();
        let err = DomainError::missing_template(slot_id, ItemId::new("T9"));
        assert_eq!(
            err.to_string(),
            format!("Template T9 of wargear slot {slot_id} is missing")
        );
    }

    #[test]
    fn test_invalid_partition_error() {
        let err = DomainError::invalid_partition("slot missing");
        assert_eq!(err.to_string(), "Invalid grouping: slot missing");
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err: DomainError = serde_err.into();
        assert!(matches!(err, DomainError::Serialization(_)));
    }
}
