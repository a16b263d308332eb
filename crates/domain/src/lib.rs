//! Armoury domain
//!
//! Archetypes own a list of wargear slots. A slot points at a template item
//! (or carries its own generic record) and stores only what the archetype
//! changed about it, as a diff. Slots are grouped for presentation, and any
//! structural change to the list marks that grouping stale.
//!
//! This crate is pure: no I/O, no logging, no async. Hosts reach it through
//! [`TemplateCatalog`] and the dotted-path [`FieldChanges`] it produces.

pub mod aggregates;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod projection;
pub mod summary;
pub mod value_objects;

// Re-export aggregates
pub use aggregates::{
    skill_list_changes, Archetype, Group, GroupMode, Grouping, GroupingState, Partition,
    WargearList, GROUPS_PATH, SKILLS_PATH, WARGEAR_PATH,
};

pub use catalog::TemplateCatalog;

// Re-export entities
pub use entities::{
    ItemDocument, ItemKind, RangeType, SlotKind, TemplateItem, WargearSlot, UPGRADES_PATH,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{GroupId, ItemId, SlotId};

pub use projection::{project, EffectiveRecord, Projection};
pub use summary::{render, GroupSummary, RenderOptions, SummaryGroup, SummaryItem};

// Re-export value objects
pub use value_objects::{
    apply_diff, compute_diff, compute_patch, merge_diff, toggle_changes, DiffMap, DiffValue,
    FieldChanges, ItemReference, PotencyList, Record, ReferenceField, SheetList, ABILITIES_PATH,
    JOURNAL_PATH, OBJECTIVES_PATH, PATH_SEPARATOR, POTENCY_PATH, SUGGESTED_TALENTS_PATH,
};
