//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific sheet.
//! Use cases orchestrate the domain aggregates and the item store.

pub mod item_sheet;
pub mod wargear;

// Re-export main types
pub use item_sheet::ItemSheetUseCases;
pub use wargear::{SheetError, WargearUseCases};
