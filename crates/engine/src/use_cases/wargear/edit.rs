//! Slot editor use cases.
//!
//! Opening an editor seeds the host's sub-sheet with a slot's effective
//! record. Submitting folds the edited record back into the slot's diff.
//! The session carries the slot id, so a submit after the slot was removed
//! fails instead of editing whatever slot now sits at the old index.

use std::sync::Arc;

use armoury_domain::{ItemId, Projection, Record};

use crate::infrastructure::ports::{EditSession, EditorPort};

use super::error::SheetError;
use super::sheet::WargearSheet;

/// Open slot editor use case.
pub struct OpenSlotEditor {
    sheet: Arc<WargearSheet>,
    editor: Arc<dyn EditorPort>,
}

impl OpenSlotEditor {
    pub fn new(sheet: Arc<WargearSheet>, editor: Arc<dyn EditorPort>) -> Self {
        Self { sheet, editor }
    }

    /// Open the editor for the slot at `index`.
    ///
    /// Returns `None` without opening anything when the slot's template is
    /// missing from the catalog.
    pub async fn execute(
        &self,
        archetype_id: &ItemId,
        index: usize,
    ) -> Result<Option<EditSession>, SheetError> {
        let archetype = self.sheet.load(archetype_id).await?;

        match archetype.project(index, self.sheet.catalog())? {
            Projection::Resolved(effective) => {
                let session = EditSession::new(archetype_id.clone(), effective.slot_id);
                tracing::debug!(
                    archetype_id = %archetype_id,
                    slot_id = %effective.slot_id,
                    index,
                    "Opening slot editor"
                );
                self.editor.open(session.clone(), effective);
                Ok(Some(session))
            }
            Projection::Dangling {
                reference_id,
                display_name,
                ..
            } => {
                tracing::warn!(
                    archetype_id = %archetype_id,
                    reference_id = %reference_id,
                    name = %display_name,
                    "Cannot edit wargear whose template is missing"
                );
                Ok(None)
            }
        }
    }
}

/// Submit slot edit use case.
pub struct SubmitSlotEdit {
    sheet: Arc<WargearSheet>,
}

impl SubmitSlotEdit {
    pub fn new(sheet: Arc<WargearSheet>) -> Self {
        Self { sheet }
    }

    /// Merge `incoming` into the session's slot.
    ///
    /// Returns whether anything was persisted; resubmitting an unchanged
    /// form is a no-op.
    pub async fn execute(
        &self,
        session: &EditSession,
        incoming: &Record,
    ) -> Result<bool, SheetError> {
        let mut archetype = self.sheet.load(&session.archetype_id).await?;

        let changed = archetype.update_slot(session.slot_id, incoming, self.sheet.catalog())?;
        if !changed {
            tracing::debug!(slot_id = %session.slot_id, "Slot edit changed nothing");
            return Ok(false);
        }

        self.sheet.save_wargear(&archetype).await?;
        tracing::debug!(
            archetype_id = %session.archetype_id,
            slot_id = %session.slot_id,
            "Saved slot edit"
        );
        Ok(true)
    }
}
