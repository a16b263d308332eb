//! Wargear slot - one override entry of an archetype

use serde::{Deserialize, Serialize};

use crate::entities::ItemDocument;
use crate::ids::{ItemId, SlotId};
use crate::value_objects::{DiffMap, Record};

/// What a slot overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlotKind {
    /// Overrides a catalog template
    Templated {
        #[serde(rename = "id")]
        reference_id: ItemId,
    },
    /// Fully inline entry; the diff holds the whole record
    Generic,
}

/// One entry of an archetype's wargear list
///
/// # Invariants
///
/// - `id` never changes; the slot's position in the list is presentation only
/// - `display_name` mirrors `diff.name` when the diff sets one, otherwise the
///   template's (or generic record's) name as of the last edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WargearSlot {
    #[serde(rename = "slotId", default = "SlotId::new")]
    id: SlotId,
    #[serde(flatten)]
    kind: SlotKind,
    #[serde(default)]
    diff: DiffMap,
    #[serde(rename = "name", default)]
    display_name: String,
}

impl WargearSlot {
    /// A slot over `template` with no overrides.
    pub fn templated(template: &ItemDocument) -> Self {
        Self {
            id: SlotId::new(),
            kind: SlotKind::Templated {
                reference_id: template.id.clone(),
            },
            diff: DiffMap::new(),
            display_name: template.name.clone(),
        }
    }

    /// A generic slot holding `initial` as its record.
    pub fn generic(initial: &Record) -> Self {
        Self {
            id: SlotId::new(),
            kind: SlotKind::Generic,
            diff: DiffMap::from_record(initial),
            display_name: initial.name().unwrap_or_default().to_string(),
        }
    }

    #[inline]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &SlotKind {
        &self.kind
    }

    /// The template this slot overrides, `None` for generic slots.
    pub fn reference_id(&self) -> Option<&ItemId> {
        match &self.kind {
            SlotKind::Templated { reference_id } => Some(reference_id),
            SlotKind::Generic => None,
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self.kind, SlotKind::Generic)
    }

    #[inline]
    pub fn diff(&self) -> &DiffMap {
        &self.diff
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Replace the diff and resync the cached name.
    pub(crate) fn set_diff(&mut self, diff: DiffMap, fallback_name: &str) {
        self.display_name = diff.name().unwrap_or(fallback_name).to_string();
        self.diff = diff;
    }
}
