//! Human-readable enumeration of an archetype's wargear by group.
//!
//! Rendering is deterministic: it depends only on the partition, the
//! wargear list and what the catalog resolves.

use serde::Serialize;

use crate::aggregates::{GroupMode, Partition, WargearList};
use crate::catalog::TemplateCatalog;
use crate::ids::SlotId;
use crate::projection::project;

/// Formatting switches for [`GroupSummary::to_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    /// Wrap multi-member groups in parentheses
    pub parentheses: bool,
    /// Join `All` members with commas instead of "and"
    pub commas: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            parentheses: true,
            commas: true,
        }
    }
}

/// One slot as it appears in the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub slot_id: SlotId,
    /// Position in the wargear list at render time
    pub index: usize,
    pub name: String,
    /// The slot's template could not be resolved
    pub dangling: bool,
}

/// One group as it appears in the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryGroup {
    pub label: Option<String>,
    pub mode: GroupMode,
    pub items: Vec<SummaryItem>,
}

/// Ordered, structured description of the grouped wargear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub groups: Vec<SummaryGroup>,
}

impl GroupSummary {
    /// Slots whose template could not be resolved.
    pub fn dangling(&self) -> impl Iterator<Item = &SummaryItem> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .filter(|item| item.dangling)
    }

    /// Render as a single line, e.g. `Lasgun, Knife, (Bolt Pistol or Chainsword)`.
    ///
    /// The outermost level is never parenthesized.
    pub fn to_text(&self, options: RenderOptions) -> String {
        let and = if options.commas { ", " } else { " and " };
        let wrap = options.parentheses && self.groups.len() > 1;

        self.groups
            .iter()
            .map(|group| {
                let connector = match group.mode {
                    GroupMode::All => and,
                    GroupMode::ChooseOne => " or ",
                };
                let names: Vec<String> = group.items.iter().map(item_text).collect();
                let mut text = names.join(connector);
                if wrap && names.len() > 1 {
                    text = format!("({text})");
                }
                match &group.label {
                    Some(label) => format!("{label}: {text}"),
                    None => text,
                }
            })
            .collect::<Vec<_>>()
            .join(and)
    }
}

fn item_text(item: &SummaryItem) -> String {
    if item.dangling {
        format!("[missing: {}]", item.name)
    } else {
        item.name.clone()
    }
}

/// Describe `wargear` grouped by `partition`.
///
/// Members the list no longer has are skipped; callers only render valid
/// partitions, so this cannot drop a live slot.
pub fn render(
    partition: &Partition,
    wargear: &WargearList,
    catalog: &dyn TemplateCatalog,
) -> GroupSummary {
    let groups = partition
        .groups()
        .iter()
        .map(|group| SummaryGroup {
            label: group.label.clone(),
            mode: group.mode,
            items: group
                .members
                .iter()
                .filter_map(|id| {
                    let index = wargear.position(*id).ok()?;
                    let slot = wargear.get(index).ok()?;
                    let projection = project(slot, catalog);
                    Some(SummaryItem {
                        slot_id: *id,
                        index,
                        name: projection.display_name().to_string(),
                        dangling: projection.is_dangling(),
                    })
                })
                .collect(),
        })
        .collect();

    GroupSummary { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::Group;
    use crate::entities::{ItemDocument, ItemKind};
    use crate::ids::ItemId;
    use std::collections::HashMap;

    struct Fixture {
        wargear: WargearList,
        catalog: HashMap<ItemId, ItemDocument>,
    }

    fn fixture(names: &[&str]) -> Fixture {
        let mut wargear = WargearList::new();
        let mut catalog = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            let item = ItemDocument::new(format!("T{i}").as_str(), *name, ItemKind::Weapon);
            wargear.attach(&item);
            catalog.insert(item.id.clone(), item);
        }
        Fixture { wargear, catalog }
    }

    #[test]
    fn single_group_renders_without_outer_parentheses() {
        let f = fixture(&["Lasgun", "Knife", "Flak Armour"]);
        let partition = Partition::single_group(&f.wargear);

        let summary = render(&partition, &f.wargear, &f.catalog);

        assert_eq!(
            summary.to_text(RenderOptions::default()),
            "Lasgun, Knife, Flak Armour"
        );
        assert_eq!(summary.groups[0].items[2].index, 2);
    }

    #[test]
    fn choice_groups_are_parenthesized() {
        let f = fixture(&["Lasgun", "Knife", "Bolt Pistol", "Chainsword"]);
        let ids = f.wargear.ids();
        let partition = Partition::new(vec![
            Group::new(GroupMode::All, vec![ids[0]]),
            Group::new(GroupMode::All, vec![ids[1]]),
            Group::new(GroupMode::ChooseOne, vec![ids[2], ids[3]]),
        ]);

        let summary = render(&partition, &f.wargear, &f.catalog);

        assert_eq!(
            summary.to_text(RenderOptions::default()),
            "Lasgun, Knife, (Bolt Pistol or Chainsword)"
        );
        assert_eq!(
            summary.to_text(RenderOptions {
                parentheses: false,
                commas: false
            }),
            "Lasgun and Knife and Bolt Pistol or Chainsword"
        );
    }

    #[test]
    fn labels_prefix_their_group() {
        let f = fixture(&["Laspistol", "Autopistol"]);
        let partition = Partition::new(vec![
            Group::new(GroupMode::ChooseOne, f.wargear.ids()).with_label("Sidearm"),
        ]);

        let text = render(&partition, &f.wargear, &f.catalog).to_text(RenderOptions::default());

        assert_eq!(text, "Sidearm: Laspistol or Autopistol");
    }

    #[test]
    fn dangling_slots_render_as_placeholders() {
        let mut f = fixture(&["Lasgun", "Knife"]);
        f.catalog.remove(&ItemId::new("T1"));
        let partition = Partition::single_group(&f.wargear);

        let summary = render(&partition, &f.wargear, &f.catalog);

        assert_eq!(summary.to_text(RenderOptions::default()), "Lasgun, [missing: Knife]");
        assert_eq!(summary.dangling().count(), 1);
    }

    #[test]
    fn rendering_is_deterministic() {
        let f = fixture(&["Lasgun", "Knife"]);
        let partition = Partition::single_group(&f.wargear);

        let first = render(&partition, &f.wargear, &f.catalog);
        let second = render(&partition, &f.wargear, &f.catalog);

        assert_eq!(first, second);
    }
}
