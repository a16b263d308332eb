//! Aggregates - consistency boundaries around wargear and its grouping

mod archetype;
mod grouping;
mod wargear;

pub use archetype::{skill_list_changes, Archetype, GROUPS_PATH, SKILLS_PATH, WARGEAR_PATH};
pub use grouping::{Group, GroupMode, Grouping, GroupingState, Partition};
pub use wargear::WargearList;
