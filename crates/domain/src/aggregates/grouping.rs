//! Grouping - presentation partition of wargear slots into choice groups
//!
//! # State machine
//!
//! ```text
//!            attach / attach_generic / remove
//!   Valid ─────────────────────────────────────▶ Stale
//!     ▲                                            │
//!     └──────────── reset() / configure() ─────────┘
//! ```
//!
//! A stale grouping is never handed out as a partition. `configure` is
//! accepted in either state because the new partition is checked against
//! the current wargear list in full.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::aggregates::WargearList;
use crate::error::DomainError;
use crate::ids::{GroupId, SlotId};

/// How the members of a group combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupMode {
    /// The archetype receives every member
    #[default]
    All,
    /// The player picks one member
    ChooseOne,
}

/// A named or positional subset of slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub mode: GroupMode,
    pub members: Vec<SlotId>,
}

impl Group {
    pub fn new(mode: GroupMode, members: Vec<SlotId>) -> Self {
        Self {
            id: GroupId::new(),
            label: None,
            mode,
            members,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered list of groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(Vec<Group>);

impl Partition {
    pub fn new(groups: Vec<Group>) -> Self {
        Self(groups)
    }

    /// One `All` group over every slot, in list order (no groups when empty).
    pub fn single_group(wargear: &WargearList) -> Self {
        if wargear.is_empty() {
            return Self(Vec::new());
        }
        Self(vec![Group::new(GroupMode::All, wargear.ids())])
    }

    pub fn groups(&self) -> &[Group] {
        &self.0
    }

    /// The group containing `slot`.
    pub fn group_of(&self, slot: SlotId) -> Option<&Group> {
        self.0.iter().find(|group| group.members.contains(&slot))
    }

    /// Check that every slot of `wargear` is in exactly one non-empty group
    /// and that no group names a slot the list does not have.
    pub fn validate(&self, wargear: &WargearList) -> Result<(), DomainError> {
        let known: HashSet<SlotId> = wargear.ids().into_iter().collect();
        let mut seen: HashSet<SlotId> = HashSet::with_capacity(known.len());

        for (position, group) in self.0.iter().enumerate() {
            if group.members.is_empty() {
                return Err(DomainError::invalid_partition(format!(
                    "group {} is empty",
                    position + 1
                )));
            }
            for member in &group.members {
                if !known.contains(member) {
                    return Err(DomainError::invalid_partition(format!(
                        "group {} references unknown slot {}",
                        position + 1,
                        member
                    )));
                }
                if !seen.insert(*member) {
                    return Err(DomainError::invalid_partition(format!(
                        "slot {} appears in more than one group",
                        member
                    )));
                }
            }
        }

        if let Some(index) = wargear.ids().iter().position(|id| !seen.contains(id)) {
            return Err(DomainError::invalid_partition(format!(
                "slot at index {} is not in any group",
                index
            )));
        }
        Ok(())
    }
}

/// Whether a grouping can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingState {
    Valid,
    Stale,
}

/// Grouping of an archetype's wargear
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grouping {
    Valid(Partition),
    /// The wargear list changed shape since `last` was built
    Stale { last: Partition },
}

impl Grouping {
    /// A valid single-group partition over `wargear`.
    pub fn new(wargear: &WargearList) -> Self {
        Self::Valid(Partition::single_group(wargear))
    }

    /// Restore a persisted partition; one that no longer fits loads as stale.
    pub fn load(partition: Partition, wargear: &WargearList) -> Self {
        match partition.validate(wargear) {
            Ok(()) => Self::Valid(partition),
            Err(_) => Self::Stale { last: partition },
        }
    }

    pub fn state(&self) -> GroupingState {
        match self {
            Self::Valid(_) => GroupingState::Valid,
            Self::Stale { .. } => GroupingState::Stale,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state() == GroupingState::Valid
    }

    /// The partition, only while valid.
    pub fn partition(&self) -> Option<&Partition> {
        match self {
            Self::Valid(partition) => Some(partition),
            Self::Stale { .. } => None,
        }
    }

    /// Mark the grouping stale after a structural change to the wargear list.
    pub fn invalidate(&mut self) {
        if let Self::Valid(partition) = self {
            let last = std::mem::take(partition);
            *self = Self::Stale { last };
        }
    }

    /// Rebuild the default single-group partition.
    pub fn reset(&mut self, wargear: &WargearList) {
        *self = Self::new(wargear);
    }

    /// Replace the partition with a user-defined one.
    pub fn configure(
        &mut self,
        partition: Partition,
        wargear: &WargearList,
    ) -> Result<(), DomainError> {
        partition.validate(wargear)?;
        *self = Self::Valid(partition);
        Ok(())
    }
}
