//! External service port traits (slot editor).

use armoury_domain::{EffectiveRecord, ItemId, SlotId};

// =============================================================================
// Editor Types
// =============================================================================

/// A slot editor the host has been asked to show.
///
/// Holds the slot's identity rather than its index, so a submission still
/// lands on the right slot after earlier slots were removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub archetype_id: ItemId,
    pub slot_id: SlotId,
}

impl EditSession {
    pub fn new(archetype_id: ItemId, slot_id: SlotId) -> Self {
        Self {
            archetype_id,
            slot_id,
        }
    }
}

// =============================================================================
// Editor Port
// =============================================================================

/// Opens a sub-sheet seeded with a slot's effective record.
///
/// The host renders the form and later calls the submit use case with the
/// session and the edited record. Closing without submitting needs no call.
#[cfg_attr(test, mockall::automock)]
pub trait EditorPort: Send + Sync {
    fn open(&self, session: EditSession, record: EffectiveRecord);
}
