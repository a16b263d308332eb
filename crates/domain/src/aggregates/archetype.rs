//! Archetype aggregate - wargear slots plus their grouping
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: wargear and grouping change only through methods
//! - **Valid by construction**: only `archetype` documents become an `Archetype`
//! - **Coupled invariants**: every structural wargear change marks the grouping stale

use serde_json::Value;

use crate::aggregates::{Grouping, Partition, WargearList};
use crate::catalog::TemplateCatalog;
use crate::entities::{ItemDocument, WargearSlot};
use crate::error::DomainError;
use crate::ids::{ItemId, SlotId};
use crate::projection::Projection;
use crate::summary::{render, GroupSummary};
use crate::value_objects::{FieldChanges, Record};

/// Document path of the wargear list
pub const WARGEAR_PATH: &str = "system.wargear";

/// Document path of the persisted grouping
pub const GROUPS_PATH: &str = "system.groups";

/// Document path of the skills an archetype may spend experience on
pub const SKILLS_PATH: &str = "system.skills.list";

/// An archetype's wargear with its grouping
#[derive(Debug, Clone, PartialEq)]
pub struct Archetype {
    id: ItemId,
    name: String,
    wargear: WargearList,
    grouping: Grouping,
    /// Stored slots lacked a `slotId` and were given one on load
    unsaved_slot_ids: bool,
}

impl Archetype {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Load the archetype stored in `item`.
    ///
    /// # Errors
    ///
    /// - `InvalidOwner` if `item` is not an archetype
    /// - `Serialization` if the stored wargear or groups cannot be decoded
    ///
    /// Stored slots without a `slotId` get a fresh one; see
    /// [`Self::has_unsaved_slot_ids`].
    pub fn from_item(item: &ItemDocument) -> Result<Self, DomainError> {
        if !item.is_archetype() {
            return Err(DomainError::invalid_owner(item.id.clone(), item.kind));
        }

        let (wargear, unsaved_slot_ids) = match item.system.get_path("wargear") {
            Some(value) => (
                serde_json::from_value::<WargearList>(value.clone())?,
                lacks_slot_ids(value),
            ),
            None => (WargearList::new(), false),
        };
        let grouping = match item.system.get_path("groups") {
            Some(value) => Grouping::load(serde_json::from_value(value.clone())?, &wargear),
            None => Grouping::new(&wargear),
        };

        Ok(Self {
            id: item.id.clone(),
            name: item.name.clone(),
            wargear,
            grouping,
            unsaved_slot_ids,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn wargear(&self) -> &WargearList {
        &self.wargear
    }

    #[inline]
    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Whether slot ids were generated on load and exist only in memory.
    ///
    /// Until the wargear is written back, the next load generates different
    /// ids, so edit sessions and groups would not find their slots.
    #[inline]
    pub fn has_unsaved_slot_ids(&self) -> bool {
        self.unsaved_slot_ids
    }

    pub fn project(
        &self,
        index: usize,
        catalog: &dyn TemplateCatalog,
    ) -> Result<Projection, DomainError> {
        self.wargear.project(index, catalog)
    }

    /// Summary of the wargear by group.
    ///
    /// A stale grouping is not trusted; the default single group is
    /// rendered until the grouping is reset or reconfigured.
    pub fn summary(&self, catalog: &dyn TemplateCatalog) -> GroupSummary {
        match self.grouping.partition() {
            Some(partition) => render(partition, &self.wargear, catalog),
            None => render(&Partition::single_group(&self.wargear), &self.wargear, catalog),
        }
    }

    // =========================================================================
    // Wargear mutations
    // =========================================================================

    pub fn attach(&mut self, template: &ItemDocument) -> usize {
        let index = self.wargear.attach(template);
        self.grouping.invalidate();
        index
    }

    pub fn attach_generic(&mut self, initial: &Record) -> usize {
        let index = self.wargear.attach_generic(initial);
        self.grouping.invalidate();
        index
    }

    pub fn remove(&mut self, index: usize) -> Result<WargearSlot, DomainError> {
        let removed = self.wargear.remove(index)?;
        self.grouping.invalidate();
        Ok(removed)
    }

    pub fn update_diff(
        &mut self,
        index: usize,
        incoming: &Record,
        catalog: &dyn TemplateCatalog,
    ) -> Result<bool, DomainError> {
        self.wargear.update_diff(index, incoming, catalog)
    }

    pub fn update_slot(
        &mut self,
        slot: SlotId,
        incoming: &Record,
        catalog: &dyn TemplateCatalog,
    ) -> Result<bool, DomainError> {
        self.wargear.update_diff_by_id(slot, incoming, catalog)
    }

    pub fn rename(
        &mut self,
        index: usize,
        name: impl Into<String>,
        catalog: &dyn TemplateCatalog,
    ) -> Result<(), DomainError> {
        self.wargear.rename(index, name, catalog)
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    pub fn reset_groups(&mut self) {
        self.grouping.reset(&self.wargear);
    }

    pub fn configure_groups(&mut self, partition: Partition) -> Result<(), DomainError> {
        self.grouping.configure(partition, &self.wargear)
    }

    // =========================================================================
    // Persistence shape
    // =========================================================================

    /// Full replacement of the stored wargear list.
    pub fn wargear_changes(&self) -> Result<FieldChanges, DomainError> {
        let mut changes = FieldChanges::new();
        changes.insert(WARGEAR_PATH.to_string(), serde_json::to_value(&self.wargear)?);
        Ok(changes)
    }

    /// Full replacement of the stored grouping, `None` while stale.
    pub fn group_changes(&self) -> Result<Option<FieldChanges>, DomainError> {
        let Some(partition) = self.grouping.partition() else {
            return Ok(None);
        };
        let mut changes = FieldChanges::new();
        changes.insert(GROUPS_PATH.to_string(), serde_json::to_value(partition)?);
        Ok(Some(changes))
    }
}

fn lacks_slot_ids(stored: &Value) -> bool {
    stored
        .as_array()
        .is_some_and(|slots| slots.iter().any(|slot| slot.get("slotId").is_none()))
}

/// Full replacement of an archetype's skill list.
pub fn skill_list_changes<I, S>(skills: I) -> FieldChanges
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let list: Vec<Value> = skills.into_iter().map(|s| Value::String(s.into())).collect();
    let mut changes = FieldChanges::new();
    changes.insert(SKILLS_PATH.to_string(), Value::Array(list));
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::{Group, GroupMode, GroupingState};
    use crate::entities::ItemKind;
    use serde_json::json;
    use std::collections::HashMap;

    fn archetype_item() -> ItemDocument {
        ItemDocument::new("A1", "Imperial Guardsman", ItemKind::Archetype)
    }

    fn template(id: &str, name: &str) -> ItemDocument {
        ItemDocument::new(id, name, ItemKind::Weapon)
    }

    #[test]
    fn non_archetype_owner_is_rejected() {
        let err = Archetype::from_item(&template("T1", "Lasgun")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOwner { .. }));
    }

    #[test]
    fn fresh_archetype_has_valid_empty_grouping() {
        let archetype = Archetype::from_item(&archetype_item()).unwrap();
        assert!(archetype.wargear().is_empty());
        assert_eq!(archetype.grouping().state(), GroupingState::Valid);
    }

    #[test]
    fn structural_changes_make_grouping_stale() {
        let mut archetype = Archetype::from_item(&archetype_item()).unwrap();

        archetype.attach(&template("T1", "Lasgun"));
        assert_eq!(archetype.grouping().state(), GroupingState::Stale);
        archetype.reset_groups();
        assert_eq!(archetype.grouping().state(), GroupingState::Valid);

        archetype.attach_generic(&Record::from_value(json!({ "name": "Rations" })).unwrap());
        assert_eq!(archetype.grouping().state(), GroupingState::Stale);
        archetype.reset_groups();

        archetype.remove(0).unwrap();
        assert_eq!(archetype.grouping().state(), GroupingState::Stale);
    }

    #[test]
    fn diff_edits_keep_grouping_valid() {
        let lasgun = template("T1", "Lasgun");
        let catalog = HashMap::from([(lasgun.id.clone(), lasgun.clone())]);
        let mut archetype = Archetype::from_item(&archetype_item()).unwrap();
        archetype.attach(&lasgun);
        archetype.reset_groups();

        archetype.rename(0, "Lasgun+", &catalog).unwrap();
        archetype
            .update_diff(0, &Record::from_value(json!({ "name": "Lasgun++" })).unwrap(), &catalog)
            .unwrap();

        assert!(archetype.grouping().is_valid());
    }

    #[test]
    fn configure_rejects_partition_missing_third_slot() {
        let mut archetype = Archetype::from_item(&archetype_item()).unwrap();
        for (id, name) in [("T1", "Lasgun"), ("T2", "Knife"), ("T3", "Flak Armour")] {
            archetype.attach(&template(id, name));
        }
        archetype.reset_groups();
        let ids = archetype.wargear().ids();

        let err = archetype
            .configure_groups(Partition::new(vec![Group::new(
                GroupMode::All,
                vec![ids[0], ids[1]],
            )]))
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidPartition(_)));
    }

    #[test]
    fn stored_document_round_trips() {
        let lasgun = template("T1", "Lasgun");
        let mut archetype = Archetype::from_item(&archetype_item()).unwrap();
        archetype.attach(&lasgun);
        archetype.attach(&template("T2", "Knife"));
        let ids = archetype.wargear().ids();
        archetype
            .configure_groups(Partition::new(vec![Group::new(GroupMode::ChooseOne, ids)]))
            .unwrap();

        let mut changes = archetype.wargear_changes().unwrap();
        changes.extend(archetype.group_changes().unwrap().unwrap());
        let stored = archetype_item().with_changes(&changes).unwrap();
        let reloaded = Archetype::from_item(&stored).unwrap();

        assert_eq!(reloaded, archetype);
    }

    #[test]
    fn legacy_slots_without_ids_are_flagged_until_saved() {
        let legacy = archetype_item().with_system(
            Record::from_value(json!({
                "wargear": [{ "type": "templated", "id": "T1", "name": "Lasgun", "diff": {} }]
            }))
            .unwrap(),
        );

        let archetype = Archetype::from_item(&legacy).unwrap();
        assert!(archetype.has_unsaved_slot_ids());
        assert_eq!(archetype.wargear().len(), 1);

        let saved = legacy.with_changes(&archetype.wargear_changes().unwrap()).unwrap();
        let reloaded = Archetype::from_item(&saved).unwrap();
        assert!(!reloaded.has_unsaved_slot_ids());
        assert_eq!(reloaded.wargear().ids(), archetype.wargear().ids());
    }

    #[test]
    fn stale_grouping_has_no_group_changes() {
        let mut archetype = Archetype::from_item(&archetype_item()).unwrap();
        archetype.attach(&template("T1", "Lasgun"));

        assert_eq!(archetype.group_changes().unwrap(), None);
    }

    #[test]
    fn stale_summary_falls_back_to_single_group() {
        let lasgun = template("T1", "Lasgun");
        let knife = template("T2", "Knife");
        let catalog = HashMap::from([
            (lasgun.id.clone(), lasgun.clone()),
            (knife.id.clone(), knife.clone()),
        ]);
        let mut archetype = Archetype::from_item(&archetype_item()).unwrap();
        archetype.attach(&lasgun);
        archetype.attach(&knife);

        let summary = archetype.summary(&catalog);

        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].items.len(), 2);
    }

    #[test]
    fn skill_list_changes_replace_the_list() {
        let changes = skill_list_changes(["ballisticSkill", "athletics"]);
        assert_eq!(
            changes.get(SKILLS_PATH),
            Some(&json!(["ballisticSkill", "athletics"]))
        );
    }
}
