//! Wargear summary query.

use std::sync::Arc;

use armoury_domain::{GroupSummary, ItemId, RenderOptions};
use serde::Serialize;

use super::error::SheetError;
use super::sheet::WargearSheet;

/// Rendered wargear of one archetype
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WargearSummary {
    pub archetype_id: ItemId,
    pub archetype_name: String,
    pub summary: GroupSummary,
    pub text: String,
}

/// Describes an archetype's wargear by group. Read-only.
pub struct SummarizeWargear {
    sheet: Arc<WargearSheet>,
    options: RenderOptions,
}

impl SummarizeWargear {
    pub fn new(sheet: Arc<WargearSheet>, options: RenderOptions) -> Self {
        Self { sheet, options }
    }

    pub async fn execute(&self, archetype_id: &ItemId) -> Result<WargearSummary, SheetError> {
        let archetype = self.sheet.load(archetype_id).await?;
        if !archetype.grouping().is_valid() {
            tracing::debug!(archetype_id = %archetype_id, "Grouping is stale, summarizing as one group");
        }

        let summary = archetype.summary(self.sheet.catalog());
        for item in summary.dangling() {
            tracing::warn!(
                archetype_id = %archetype_id,
                slot_id = %item.slot_id,
                name = %item.name,
                "Wargear references a missing template"
            );
        }

        Ok(WargearSummary {
            archetype_id: archetype_id.clone(),
            archetype_name: archetype.name().to_string(),
            text: summary.to_text(self.options),
            summary,
        })
    }
}
