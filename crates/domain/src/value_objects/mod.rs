//! Value objects - Immutable objects defined by their attributes

mod diff;
mod potency;
mod record;
mod sheet_list;

pub use diff::{apply_diff, compute_diff, compute_patch, merge_diff, DiffMap, DiffValue};
pub use potency::{PotencyList, POTENCY_PATH};
pub use record::{FieldChanges, Record, PATH_SEPARATOR};
pub use sheet_list::{
    toggle_changes, ItemReference, ReferenceField, SheetList, ABILITIES_PATH, JOURNAL_PATH,
    OBJECTIVES_PATH, SUGGESTED_TALENTS_PATH,
};
