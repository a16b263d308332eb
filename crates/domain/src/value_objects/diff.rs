//! Sparse field-level diffs between records.
//!
//! A [`DiffMap`] maps dotted leaf paths to a [`DiffValue`]. A path that is
//! absent from the map inherits the base value; [`DiffValue::Unset`] is an
//! explicit tombstone meaning the field was removed relative to the base.
//!
//! Wargear overrides are accumulated with [`merge_diff`] rather than
//! recomputed from scratch, and [`DiffMap::prune_against`] drops entries
//! that no longer change anything. Together they make resubmitting an
//! unchanged record a no-op and make reverting a field remove its key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{FieldChanges, Record, PATH_SEPARATOR};

/// One entry of a diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum DiffValue {
    /// Overwrite the path with this value
    Set(Value),
    /// Remove the path from the base (tombstone)
    Unset,
}

impl DiffValue {
    pub fn as_set(&self) -> Option<&Value> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }
}

/// Ordered mapping from field path to override
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffMap(BTreeMap<String, DiffValue>);

impl DiffMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// A diff that sets every leaf of `record` (diff against an empty base).
    pub fn from_record(record: &Record) -> Self {
        Self(
            record
                .flatten()
                .into_iter()
                .map(|(path, value)| (path, DiffValue::Set(value)))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &str) -> Option<&DiffValue> {
        self.0.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiffValue)> {
        self.0.iter().map(|(path, value)| (path.as_str(), value))
    }

    /// Set `path`, dropping entries it shadows (ancestors and descendants).
    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        self.insert(path.into(), DiffValue::Set(value));
    }

    /// Tombstone `path`, dropping entries it shadows.
    pub fn unset(&mut self, path: impl Into<String>) {
        self.insert(path.into(), DiffValue::Unset);
    }

    pub fn remove(&mut self, path: &str) -> Option<DiffValue> {
        self.0.remove(path)
    }

    /// The overriding name, if the diff sets one.
    pub fn name(&self) -> Option<&str> {
        self.0
            .get("name")
            .and_then(DiffValue::as_set)
            .and_then(Value::as_str)
    }

    /// Re-express the diff against `base` with no redundant entries.
    ///
    /// A `Set` equal to the base value and an `Unset` of a path the base does
    /// not have are dropped, as are entries fully overwritten by an ancestor.
    pub fn prune_against(self, base: &Record) -> Self {
        compute_diff(base, &apply_diff(base, &self, true))
    }

    /// Flatten the `Set` entries into a dotted-path field map.
    pub fn to_field_map(&self) -> FieldChanges {
        self.0
            .iter()
            .filter_map(|(path, change)| change.as_set().map(|v| (path.clone(), v.clone())))
            .collect()
    }

    fn insert(&mut self, path: String, change: DiffValue) {
        self.0.retain(|existing, _| !shadows(existing, &path));
        self.0.insert(path, change);
    }
}

impl FromIterator<(String, DiffValue)> for DiffMap {
    fn from_iter<I: IntoIterator<Item = (String, DiffValue)>>(iter: I) -> Self {
        let mut diff = Self::new();
        for (path, change) in iter {
            diff.insert(path, change);
        }
        diff
    }
}

/// True when one path is a strict ancestor of the other.
fn shadows(a: &str, b: &str) -> bool {
    is_ancestor(a, b) || is_ancestor(b, a)
}

fn is_ancestor(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
}

/// Leaf paths whose value differs between `base` and `modified`.
///
/// Paths only in `modified` become `Set`; paths only in `base` become `Unset`.
/// A path whose value changes between object and non-object is a single
/// `Set` of the whole new value, so no two entries ever shadow each other.
pub fn compute_diff(base: &Record, modified: &Record) -> DiffMap {
    let base_leaves = base.flatten();
    let modified_leaves = modified.flatten();

    let mut diff = BTreeMap::new();
    for (path, value) in &modified_leaves {
        if base_leaves.get(path) != Some(value) {
            diff.insert(path.clone(), DiffValue::Set(value.clone()));
        }
    }
    for path in base_leaves.keys() {
        if modified_leaves.contains_key(path) {
            continue;
        }
        // replaced along with a parent that is no longer an object
        if diff
            .iter()
            .any(|(set, change)| matches!(change, DiffValue::Set(_)) && is_ancestor(set, path))
        {
            continue;
        }
        match modified.get_path(path) {
            // a leaf that became an object
            Some(value) => {
                diff.retain(|set, _| !is_ancestor(path, set));
                diff.insert(path.clone(), DiffValue::Set(value.clone()));
            }
            None => {
                diff.insert(path.clone(), DiffValue::Unset);
            }
        }
    }
    DiffMap(diff)
}

/// Like [`compute_diff`], but paths missing from `modified` are treated as
/// untouched rather than removed. Used for partial form submissions.
pub fn compute_patch(base: &Record, modified: &Record) -> DiffMap {
    let base_leaves = base.flatten();
    DiffMap(
        modified
            .flatten()
            .into_iter()
            .filter(|(path, value)| base_leaves.get(path) != Some(value))
            .map(|(path, value)| (path, DiffValue::Set(value)))
            .collect(),
    )
}

/// Apply `diff` to a copy of `base`.
///
/// With `overwrite = false` a `Set` only fills paths the base lacks and
/// tombstones are ignored.
pub fn apply_diff(base: &Record, diff: &DiffMap, overwrite: bool) -> Record {
    let mut result = base.clone();
    // BTreeMap order visits a parent path before its children
    for (path, change) in diff.iter() {
        match change {
            DiffValue::Set(value) => {
                if overwrite || result.get_path(path).is_none() {
                    result.set_path(path, value.clone());
                }
            }
            DiffValue::Unset => {
                if overwrite {
                    result.remove_path(path);
                }
            }
        }
    }
    result
}

/// Layer `delta` on top of `existing`; `delta` wins on every path it names.
///
/// Existing entries at or below a delta path are dropped. Existing entries
/// above one are kept: [`apply_diff`] visits them first, so the delta entry
/// still lands on top.
pub fn merge_diff(existing: &DiffMap, delta: &DiffMap) -> DiffMap {
    let mut merged: BTreeMap<String, DiffValue> = existing
        .iter()
        .filter(|(path, _)| {
            !delta
                .iter()
                .any(|(changed, _)| changed == *path || is_ancestor(changed, path))
        })
        .map(|(path, change)| (path.to_string(), change.clone()))
        .collect();
    merged.extend(
        delta
            .iter()
            .map(|(path, change)| (path.to_string(), change.clone())),
    );
    DiffMap(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn compute_diff_reports_changed_added_and_removed_leaves() {
        let base = record(json!({ "name": "Bolter", "damage": { "base": 10, "ed": 1 }, "ap": -1 }));
        let modified = record(json!({ "name": "Bolter", "damage": { "base": 12, "ed": 1 }, "salvo": 2 }));

        let diff = compute_diff(&base, &modified);

        assert_eq!(diff.len(), 3);
        assert_eq!(diff.get("damage.base"), Some(&DiffValue::Set(json!(12))));
        assert_eq!(diff.get("salvo"), Some(&DiffValue::Set(json!(2))));
        assert_eq!(diff.get("ap"), Some(&DiffValue::Unset));
        assert!(!diff.contains("name"));
    }

    #[test]
    fn apply_of_computed_diff_reproduces_modified() {
        let cases = [
            (json!({ "a": 1, "b": { "c": 2 } }), json!({ "a": 2, "b": { "c": 2, "d": [1] } })),
            (json!({ "a": { "b": 1 } }), json!({ "a": 1 })),
            (json!({ "a": 1 }), json!({ "a": { "b": 1 } })),
            (json!({ "a": {} }), json!({ "a": { "b": true } })),
            (json!({ "a": { "b": 1 } }), json!({ "a": {} })),
            (json!({ "a": { "b": 1 }, "c": null }), json!({})),
        ];

        for (base, modified) in cases {
            let base = record(base);
            let modified = record(modified);
            let diff = compute_diff(&base, &modified);
            assert_eq!(apply_diff(&base, &diff, true), modified, "diff: {diff:?}");
        }
    }

    #[test]
    fn compute_of_applied_diff_drops_noop_entries() {
        let base = record(json!({ "name": "Lasgun", "range": { "short": 12 } }));
        let mut diff = DiffMap::new();
        diff.set("name", json!("Lasgun"));
        diff.set("range.short", json!(15));
        diff.unset("missing");

        let applied = apply_diff(&base, &diff, true);
        let recomputed = compute_diff(&base, &applied);

        assert_eq!(recomputed, diff.prune_against(&base));
        assert_eq!(recomputed.len(), 1);
    }

    #[test]
    fn apply_diff_does_not_mutate_base() {
        let base = record(json!({ "damage": 5 }));
        let mut diff = DiffMap::new();
        diff.set("damage", json!(7));

        let applied = apply_diff(&base, &diff, true);

        assert_eq!(base.get_path("damage"), Some(&json!(5)));
        assert_eq!(applied.get_path("damage"), Some(&json!(7)));
    }

    #[test]
    fn apply_without_overwrite_only_fills_absent_paths() {
        let base = record(json!({ "damage": 5, "ap": 0 }));
        let mut diff = DiffMap::new();
        diff.set("damage", json!(7));
        diff.set("salvo", json!(1));
        diff.unset("ap");

        let applied = apply_diff(&base, &diff, false);

        assert_eq!(applied.into_value(), json!({ "damage": 5, "ap": 0, "salvo": 1 }));
    }

    #[test]
    fn merge_diff_layers_delta_over_existing() {
        let mut existing = DiffMap::new();
        existing.set("damage", json!(7));
        existing.set("name", json!("Bolter+"));
        let mut delta = DiffMap::new();
        delta.set("damage", json!(9));
        delta.unset("ap");

        let merged = merge_diff(&existing, &delta);

        assert_eq!(merged.get("damage"), Some(&DiffValue::Set(json!(9))));
        assert_eq!(merged.name(), Some("Bolter+"));
        assert_eq!(merged.get("ap"), Some(&DiffValue::Unset));
    }

    #[test]
    fn merge_diff_drops_shadowed_paths() {
        let mut existing = DiffMap::new();
        existing.set("damage.base", json!(12));
        existing.set("damage.ed", json!(2));
        let mut delta = DiffMap::new();
        delta.set("damage", json!(5));

        let merged = merge_diff(&existing, &delta);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("damage"), Some(&DiffValue::Set(json!(5))));
    }

    #[test]
    fn object_replaced_by_scalar_is_a_single_set() {
        let base = record(json!({ "damage": { "base": 10, "ed": 1 } }));

        let diff = compute_diff(&base, &record(json!({ "damage": 5 })));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("damage"), Some(&DiffValue::Set(json!(5))));

        let diff = compute_diff(&base, &record(json!({ "damage": {} })));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("damage"), Some(&DiffValue::Set(json!({}))));
    }

    #[test]
    fn scalar_replaced_by_object_is_a_single_set() {
        let base = record(json!({ "damage": 5 }));

        let diff = compute_diff(&base, &record(json!({ "damage": { "base": 12 } })));

        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("damage"), Some(&DiffValue::Set(json!({ "base": 12 }))));
    }

    #[test]
    fn merge_diff_keeps_child_tombstones_from_dropping_a_new_parent() {
        let existing = DiffMap::new();
        let base = record(json!({ "damage": { "base": 10, "ed": 1 } }));
        let delta = compute_diff(&base, &record(json!({ "damage": 5 })));

        let merged = merge_diff(&existing, &delta);

        assert_eq!(
            apply_diff(&base, &merged, true).into_value(),
            json!({ "damage": 5 })
        );
    }

    #[test]
    fn merge_diff_folds_nested_edit_into_replaced_parent() {
        let template = record(json!({ "damage": { "base": 10, "ed": 1 } }));
        let mut existing = DiffMap::new();
        existing.set("damage", json!({ "base": 12 }));
        let current = apply_diff(&template, &existing, true);
        let delta = compute_diff(&current, &record(json!({ "damage": { "base": 13 } })));

        let merged = merge_diff(&existing, &delta).prune_against(&template);

        assert_eq!(
            apply_diff(&template, &merged, true).into_value(),
            json!({ "damage": { "base": 13 } })
        );
        assert_eq!(merged.get("damage.ed"), Some(&DiffValue::Unset));
    }

    #[test]
    fn prune_against_drops_entries_overwritten_by_a_parent() {
        let base = record(json!({ "damage": { "base": 10 } }));
        let mut existing = DiffMap::new();
        existing.unset("damage");
        existing.unset("missing");
        let mut delta = DiffMap::new();
        delta.set("damage.base", json!(10));
        let diff = merge_diff(&existing, &delta);
        assert_eq!(diff.len(), 3);

        let pruned = diff.clone().prune_against(&base);

        assert!(pruned.is_empty(), "pruned: {pruned:?}");
        assert_eq!(apply_diff(&base, &diff, true), base);
    }

    #[test]
    fn shadowing_ignores_sibling_prefixes() {
        let mut diff = DiffMap::new();
        diff.set("damage", json!(5));
        diff.set("damageBonus", json!(1));
        assert_eq!(diff.len(), 2);
    }

    #[test]
    fn prune_against_removes_reverted_values() {
        let base = record(json!({ "name": "Bolter", "damage": 5 }));
        let mut diff = DiffMap::new();
        diff.set("damage", json!(5));
        diff.unset("salvo");

        assert!(diff.prune_against(&base).is_empty());
    }

    #[test]
    fn compute_patch_never_emits_tombstones() {
        let base = record(json!({ "name": "Knife", "damage": 3 }));
        let form = record(json!({ "damage": 4 }));

        let patch = compute_patch(&base, &form);

        assert_eq!(patch.len(), 1);
        assert_eq!(patch.to_field_map().get("damage"), Some(&json!(4)));
    }

    #[test]
    fn diff_serializes_with_explicit_tombstones() {
        let mut diff = DiffMap::new();
        diff.set("damage", json!(7));
        diff.unset("ap");

        let value = serde_json::to_value(&diff).unwrap();

        assert_eq!(
            value,
            json!({ "ap": { "op": "unset" }, "damage": { "op": "set", "value": 7 } })
        );
        let back: DiffMap = serde_json::from_value(value).unwrap();
        assert_eq!(back, diff);
    }
}
