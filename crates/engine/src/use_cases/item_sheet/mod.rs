//! Item sheet use cases.
//!
//! Form submission, drops, weapon upgrades, potency, archetype skills,
//! background lists and item links.

use std::sync::Arc;

use armoury_domain::{ItemId, RangeType};

use crate::infrastructure::ports::{IdGenerator, ItemStore};
use crate::use_cases::wargear::{AttachWargear, SheetError};

mod drop;
mod lists;
mod potency;
mod references;
mod submit;
mod upgrades;

pub use drop::{DropOnItem, DropOutcome};
pub use lists::EditSheetLists;
pub use potency::EditPotency;
pub use references::EditReferences;
pub use submit::{SetArchetypeSkills, SubmitItemForm};
pub use upgrades::{ApplyUpgrade, RemoveUpgrade};

/// Container for item sheet use cases.
pub struct ItemSheetUseCases {
    pub ops: Arc<ItemSheetOps>,
    pub submit: Arc<SubmitItemForm>,
    pub skills: Arc<SetArchetypeSkills>,
    pub drop: Arc<DropOnItem>,
    pub apply_upgrade: Arc<ApplyUpgrade>,
    pub remove_upgrade: Arc<RemoveUpgrade>,
    pub potency: Arc<EditPotency>,
    pub lists: Arc<EditSheetLists>,
    pub references: Arc<EditReferences>,
}

impl ItemSheetUseCases {
    pub fn new(
        store: Arc<dyn ItemStore>,
        random: Arc<dyn IdGenerator>,
        attach: Arc<AttachWargear>,
    ) -> Self {
        let apply_upgrade = Arc::new(ApplyUpgrade::new(store.clone(), random));
        let references = Arc::new(EditReferences::new(store.clone()));
        Self {
            ops: Arc::new(ItemSheetOps::new(store.clone())),
            submit: Arc::new(SubmitItemForm::new(store.clone())),
            skills: Arc::new(SetArchetypeSkills::new(store.clone())),
            drop: Arc::new(DropOnItem::new(
                store.clone(),
                apply_upgrade.clone(),
                attach,
                references.clone(),
            )),
            apply_upgrade,
            remove_upgrade: Arc::new(RemoveUpgrade::new(store.clone())),
            potency: Arc::new(EditPotency::new(store.clone())),
            lists: Arc::new(EditSheetLists::new(store)),
            references,
        }
    }
}

/// Item sheet queries.
pub struct ItemSheetOps {
    store: Arc<dyn ItemStore>,
}

impl ItemSheetOps {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// How the weapon's range field is entered on its sheet.
    pub async fn range_type(&self, item_id: &ItemId) -> Result<RangeType, SheetError> {
        let item = self
            .store
            .get(item_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(item_id.clone()))?;
        Ok(item.range_type())
    }
}
