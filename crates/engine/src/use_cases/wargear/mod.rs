//! Archetype wargear use cases.
//!
//! Each use case loads the archetype, applies one domain operation and
//! awaits a single full-replacement write before returning.

use std::sync::Arc;

use crate::infrastructure::ports::EditorPort;
use armoury_domain::RenderOptions;

mod attach;
mod edit;
mod error;
mod groups;
mod remove;
mod rename;
mod sheet;
mod summary;

pub use attach::AttachWargear;
pub use edit::{OpenSlotEditor, SubmitSlotEdit};
pub use error::SheetError;
pub use groups::{ConfigureGroups, ResetGroups};
pub use remove::RemoveWargear;
pub use rename::RenameWargear;
pub use sheet::WargearSheet;
pub use summary::{SummarizeWargear, WargearSummary};

#[cfg(test)]
pub(crate) use sheet::test_support;

/// Container for wargear use cases.
pub struct WargearUseCases {
    pub attach: Arc<AttachWargear>,
    pub open_editor: Arc<OpenSlotEditor>,
    pub submit_edit: Arc<SubmitSlotEdit>,
    pub remove: Arc<RemoveWargear>,
    pub rename: Arc<RenameWargear>,
    pub reset_groups: Arc<ResetGroups>,
    pub configure_groups: Arc<ConfigureGroups>,
    pub summarize: Arc<SummarizeWargear>,
}

impl WargearUseCases {
    pub fn new(
        sheet: Arc<WargearSheet>,
        editor: Arc<dyn EditorPort>,
        summary_options: RenderOptions,
    ) -> Self {
        Self {
            attach: Arc::new(AttachWargear::new(sheet.clone())),
            open_editor: Arc::new(OpenSlotEditor::new(sheet.clone(), editor)),
            submit_edit: Arc::new(SubmitSlotEdit::new(sheet.clone())),
            remove: Arc::new(RemoveWargear::new(sheet.clone())),
            rename: Arc::new(RenameWargear::new(sheet.clone())),
            reset_groups: Arc::new(ResetGroups::new(sheet.clone())),
            configure_groups: Arc::new(ConfigureGroups::new(sheet.clone())),
            summarize: Arc::new(SummarizeWargear::new(sheet, summary_options)),
        }
    }
}
