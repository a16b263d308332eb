//! Remove wargear use case.

use std::sync::Arc;

use armoury_domain::ItemId;

use super::error::SheetError;
use super::sheet::WargearSheet;

/// Remove wargear use case.
///
/// Later slots shift down by one; indices the caller held for them are
/// stale after this returns.
pub struct RemoveWargear {
    sheet: Arc<WargearSheet>,
}

impl RemoveWargear {
    pub fn new(sheet: Arc<WargearSheet>) -> Self {
        Self { sheet }
    }

    /// Remove the slot at `index`. Returns the removed slot's display name.
    pub async fn execute(&self, archetype_id: &ItemId, index: usize) -> Result<String, SheetError> {
        let mut archetype = self.sheet.load(archetype_id).await?;
        let removed = archetype.remove(index)?;
        self.sheet.save_structure(&mut archetype).await?;

        tracing::info!(
            archetype_id = %archetype_id,
            slot_id = %removed.id(),
            index,
            remaining = archetype.wargear().len(),
            "Removed wargear"
        );
        Ok(removed.display_name().to_string())
    }
}
