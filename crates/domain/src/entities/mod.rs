//! Entities - Objects with identity

mod item;
mod wargear_slot;

pub use item::{ItemDocument, ItemKind, RangeType, TemplateItem, UPGRADES_PATH};
pub use wargear_slot::{SlotKind, WargearSlot};
