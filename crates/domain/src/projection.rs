//! Effective view of a wargear slot.
//!
//! A projection merges a slot's diff onto its template. It is side-effect
//! free and feeds both the archetype summary and the slot editor's form.

use serde_json::Value;

use crate::catalog::TemplateCatalog;
use crate::entities::{ItemKind, SlotKind, WargearSlot};
use crate::error::DomainError;
use crate::ids::{ItemId, SlotId};
use crate::value_objects::{apply_diff, Record};

/// The merged record of a slot
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRecord {
    pub slot_id: SlotId,
    /// Template behind the slot, `None` for generic slots
    pub template_id: Option<ItemId>,
    pub kind: ItemKind,
    pub name: String,
    /// Template record with the diff applied (`name` included)
    pub record: Record,
}

/// Result of projecting a slot
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Resolved(EffectiveRecord),
    /// The slot's template no longer exists in the catalog
    Dangling {
        slot_id: SlotId,
        reference_id: ItemId,
        display_name: String,
    },
}

impl Projection {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(effective) => &effective.name,
            Self::Dangling { display_name, .. } => display_name,
        }
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::Dangling { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Resolved(effective) => Some(&effective.record),
            Self::Dangling { .. } => None,
        }
    }

    pub fn into_effective(self) -> Option<EffectiveRecord> {
        match self {
            Self::Resolved(effective) => Some(effective),
            Self::Dangling { .. } => None,
        }
    }
}

/// Merge `slot`'s diff onto its template.
pub fn project(slot: &WargearSlot, catalog: &dyn TemplateCatalog) -> Projection {
    match slot.kind() {
        SlotKind::Templated { reference_id } => match catalog.resolve(reference_id) {
            Some(template) => {
                let name = slot.diff().name().unwrap_or(template.name.as_str()).to_string();
                let mut record = apply_diff(&template.record(), slot.diff(), true);
                record.set_path("name", Value::String(name.clone()));
                Projection::Resolved(EffectiveRecord {
                    slot_id: slot.id(),
                    template_id: Some(template.id),
                    kind: template.kind,
                    name,
                    record,
                })
            }
            None => Projection::Dangling {
                slot_id: slot.id(),
                reference_id: reference_id.clone(),
                display_name: slot.display_name().to_string(),
            },
        },
        SlotKind::Generic => {
            let record = apply_diff(&Record::new(), slot.diff(), true);
            let name = record.name().unwrap_or(slot.display_name()).to_string();
            Projection::Resolved(EffectiveRecord {
                slot_id: slot.id(),
                template_id: None,
                kind: ItemKind::Generic,
                name,
                record,
            })
        }
    }
}

/// The record a slot's diff is relative to, with the name to fall back on
/// when the diff does not set one.
///
/// Generic slots diff against an empty record. A templated slot whose
/// template is gone has no base, so its diff cannot be recomputed.
pub(crate) fn diff_base(
    slot: &WargearSlot,
    catalog: &dyn TemplateCatalog,
) -> Result<(Record, String), DomainError> {
    match slot.reference_id() {
        Some(reference_id) => catalog
            .resolve(reference_id)
            .map(|template| (template.record(), template.name))
            .ok_or_else(|| DomainError::missing_template(slot.id(), reference_id.clone())),
        None => Ok((Record::new(), slot.display_name().to_string())),
    }
}
