//! Drop handling for item sheets.
//!
//! An upgrade dropped on a weapon is applied to it; any item dropped on an
//! archetype becomes wargear and an ability dropped on a species joins its
//! abilities. Journal entries link to archetypes, species and factions.
//! Every other combination is ignored.

use std::sync::Arc;

use armoury_domain::{ItemId, ItemKind};
use serde::Serialize;

use crate::infrastructure::ports::ItemStore;
use crate::use_cases::wargear::{AttachWargear, SheetError};

use super::references::EditReferences;
use super::upgrades::ApplyUpgrade;

/// What a drop did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DropOutcome {
    UpgradeApplied { copy_id: String },
    WargearAttached { index: usize },
    AbilityAdded { index: usize },
    JournalLinked,
    Ignored,
}

/// Drop item use case.
pub struct DropOnItem {
    store: Arc<dyn ItemStore>,
    apply_upgrade: Arc<ApplyUpgrade>,
    attach: Arc<AttachWargear>,
    references: Arc<EditReferences>,
}

impl DropOnItem {
    pub fn new(
        store: Arc<dyn ItemStore>,
        apply_upgrade: Arc<ApplyUpgrade>,
        attach: Arc<AttachWargear>,
        references: Arc<EditReferences>,
    ) -> Self {
        Self {
            store,
            apply_upgrade,
            attach,
            references,
        }
    }

    /// Drop document `dropped_id` onto the sheet of `target_id`.
    ///
    /// A dropped id the store does not know is ignored.
    pub async fn execute(
        &self,
        target_id: &ItemId,
        dropped_id: &ItemId,
    ) -> Result<DropOutcome, SheetError> {
        let target = self
            .store
            .get(target_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(target_id.clone()))?;
        let Some(dropped) = self.store.get(dropped_id).await? else {
            tracing::debug!(dropped_id = %dropped_id, "Dropped document not found, ignoring");
            return Ok(DropOutcome::Ignored);
        };

        match (target.kind, dropped.kind) {
            (ItemKind::Weapon, ItemKind::WeaponUpgrade) => {
                let copy_id = self.apply_upgrade.execute(&target, &dropped).await?;
                Ok(DropOutcome::UpgradeApplied { copy_id })
            }
            (ItemKind::Archetype, _) => {
                let index = self.attach.attach_item(target_id, &dropped).await?;
                Ok(DropOutcome::WargearAttached { index })
            }
            (ItemKind::Species, ItemKind::Ability) => {
                let index = self.references.add_ability(&target, &dropped).await?;
                Ok(DropOutcome::AbilityAdded { index })
            }
            (target_kind, dropped_kind) => {
                tracing::debug!(%target_kind, %dropped_kind, "Drop not handled");
                Ok(DropOutcome::Ignored)
            }
        }
    }

    /// Drop the journal entry `journal_ref` onto the sheet of `target_id`.
    pub async fn execute_journal(
        &self,
        target_id: &ItemId,
        journal_ref: &str,
    ) -> Result<DropOutcome, SheetError> {
        let target = self
            .store
            .get(target_id)
            .await?
            .ok_or_else(|| SheetError::ItemNotFound(target_id.clone()))?;
        if self.references.link_journal(&target, journal_ref).await? {
            Ok(DropOutcome::JournalLinked)
        } else {
            tracing::debug!(target_kind = %target.kind, "Journal drop not handled");
            Ok(DropOutcome::Ignored)
        }
    }
}
