//! Headless slot editor.

use armoury_domain::EffectiveRecord;

use crate::infrastructure::ports::{EditSession, EditorPort};

/// Editor for hosts without a UI: records the request in the log and leaves
/// the session open for a later submit.
#[derive(Debug, Default)]
pub struct LoggingEditor;

impl EditorPort for LoggingEditor {
    fn open(&self, session: EditSession, record: EffectiveRecord) {
        tracing::info!(
            archetype_id = %session.archetype_id,
            slot_id = %session.slot_id,
            name = %record.name,
            fields = record.record.flatten().len(),
            "Slot editor opened"
        );
    }
}
