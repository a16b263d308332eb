//! WargearList - the ordered override slots of an archetype
//!
//! Slots are addressed by index for presentation and by [`SlotId`] for
//! identity. Any index held across a structural change (`attach`,
//! `attach_generic`, `remove`) must be re-fetched; slot ids stay valid until
//! their slot is removed.

use serde::{Deserialize, Serialize};

use crate::catalog::TemplateCatalog;
use crate::entities::{ItemDocument, WargearSlot};
use crate::error::DomainError;
use crate::ids::SlotId;
use crate::projection::{diff_base, project, Projection};
use crate::value_objects::{apply_diff, compute_diff, merge_diff, Record};

/// Ordered collection of wargear slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WargearList {
    slots: Vec<WargearSlot>,
}

impl WargearList {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WargearSlot> {
        self.slots.iter()
    }

    /// Slot ids in list order.
    pub fn ids(&self) -> Vec<SlotId> {
        self.slots.iter().map(WargearSlot::id).collect()
    }

    pub fn get(&self, index: usize) -> Result<&WargearSlot, DomainError> {
        self.slots
            .get(index)
            .ok_or(DomainError::index_out_of_range(index, self.slots.len()))
    }

    /// Current index of the slot with `id`.
    pub fn position(&self, id: SlotId) -> Result<usize, DomainError> {
        self.slots
            .iter()
            .position(|slot| slot.id() == id)
            .ok_or(DomainError::UnknownSlot(id))
    }

    pub fn get_by_id(&self, id: SlotId) -> Result<&WargearSlot, DomainError> {
        self.position(id).map(|index| &self.slots[index])
    }

    /// Effective view of the slot at `index`.
    pub fn project(
        &self,
        index: usize,
        catalog: &dyn TemplateCatalog,
    ) -> Result<Projection, DomainError> {
        Ok(project(self.get(index)?, catalog))
    }

    // =========================================================================
    // Structural mutations
    // =========================================================================

    /// Append a slot over `template` with no overrides; returns its index.
    pub fn attach(&mut self, template: &ItemDocument) -> usize {
        self.slots.push(WargearSlot::templated(template));
        self.slots.len() - 1
    }

    /// Append a generic slot holding `initial`; returns its index.
    pub fn attach_generic(&mut self, initial: &Record) -> usize {
        self.slots.push(WargearSlot::generic(initial));
        self.slots.len() - 1
    }

    /// Remove the slot at `index`, shifting later slots down by one.
    pub fn remove(&mut self, index: usize) -> Result<WargearSlot, DomainError> {
        if index >= self.slots.len() {
            return Err(DomainError::index_out_of_range(index, self.slots.len()));
        }
        Ok(self.slots.remove(index))
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    /// Fold an edited record into the slot's diff.
    ///
    /// The change between the slot's current view and `incoming` is merged
    /// on top of the existing diff, then entries equal to the template are
    /// dropped. Resubmitting the current view changes nothing and reverting a
    /// field to its template value removes it from the diff.
    ///
    /// Returns whether the diff changed.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if there is no slot at `index`
    /// - `MissingTemplate` if the slot's template is not in the catalog
    pub fn update_diff(
        &mut self,
        index: usize,
        incoming: &Record,
        catalog: &dyn TemplateCatalog,
    ) -> Result<bool, DomainError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(DomainError::index_out_of_range(index, len))?;

        let (base, fallback_name) = diff_base(slot, catalog)?;
        let current = apply_diff(&base, slot.diff(), true);
        let delta = compute_diff(&current, incoming);
        if delta.is_empty() {
            return Ok(false);
        }

        let diff = merge_diff(slot.diff(), &delta).prune_against(&base);
        slot.set_diff(diff, &fallback_name);
        Ok(true)
    }

    /// [`Self::update_diff`] addressed by slot id.
    pub fn update_diff_by_id(
        &mut self,
        id: SlotId,
        incoming: &Record,
        catalog: &dyn TemplateCatalog,
    ) -> Result<bool, DomainError> {
        let index = self.position(id)?;
        self.update_diff(index, incoming, catalog)
    }

    /// Override the slot's name (for generic slots, the record's name).
    ///
    /// Renaming back to the template's name drops the override. A slot whose
    /// template is missing keeps the new name as is.
    pub fn rename(
        &mut self,
        index: usize,
        name: impl Into<String>,
        catalog: &dyn TemplateCatalog,
    ) -> Result<(), DomainError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(DomainError::index_out_of_range(index, len))?;

        let name = name.into();
        let mut diff = slot.diff().clone();
        diff.set("name", serde_json::Value::String(name.clone()));
        match diff_base(slot, catalog) {
            Ok((base, fallback_name)) => slot.set_diff(diff.prune_against(&base), &fallback_name),
            Err(_) => slot.set_diff(diff, &name),
        }
        Ok(())
    }
}
