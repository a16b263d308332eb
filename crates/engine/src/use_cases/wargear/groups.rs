//! Wargear grouping use cases.

use std::sync::Arc;

use armoury_domain::{ItemId, Partition};

use super::error::SheetError;
use super::sheet::WargearSheet;

/// Rebuilds the default single-group partition.
pub struct ResetGroups {
    sheet: Arc<WargearSheet>,
}

impl ResetGroups {
    pub fn new(sheet: Arc<WargearSheet>) -> Self {
        Self { sheet }
    }

    pub async fn execute(&self, archetype_id: &ItemId) -> Result<(), SheetError> {
        let mut archetype = self.sheet.load(archetype_id).await?;
        archetype.reset_groups();
        self.sheet.save_groups(&archetype).await?;

        tracing::info!(archetype_id = %archetype_id, "Reset wargear groups");
        Ok(())
    }
}

/// Replaces the grouping with a user-defined partition.
pub struct ConfigureGroups {
    sheet: Arc<WargearSheet>,
}

impl ConfigureGroups {
    pub fn new(sheet: Arc<WargearSheet>) -> Self {
        Self { sheet }
    }

    /// Fails with `InvalidPartition` unless every slot is in exactly one group.
    pub async fn execute(
        &self,
        archetype_id: &ItemId,
        partition: Partition,
    ) -> Result<(), SheetError> {
        let mut archetype = self.sheet.load(archetype_id).await?;
        let group_count = partition.groups().len();
        archetype.configure_groups(partition)?;
        self.sheet.save_groups(&archetype).await?;

        tracing::info!(archetype_id = %archetype_id, groups = group_count, "Configured wargear groups");
        Ok(())
    }
}
