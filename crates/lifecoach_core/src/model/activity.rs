//! Planner activities grouped by value category.
//!
//! # Invariants
//! - Stored names are trimmed with internal whitespace collapsed.
//! - `Activity::id` equals its name; duplicates are allowed.
//! - Each category keeps insertion order.

use super::category::ValueCategory;
use super::ModelError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One named activity inside a category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Older documents carry only `name`; the id is then empty.
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Activity {
    /// Builds an activity from raw user input.
    ///
    /// # Errors
    /// - [`ModelError::EmptyName`] when nothing remains after trimming.
    pub fn from_input(raw: &str) -> Result<Self, ModelError> {
        let name = normalize_name(raw).ok_or(ModelError::EmptyName)?;
        Ok(Self {
            id: name.clone(),
            name,
        })
    }
}

/// Activity lists keyed by category, serialized under the stored labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedActivities {
    #[serde(rename = "HIGH LIFE TIME (HLV)", default)]
    pub hlv: Vec<Activity>,
    #[serde(rename = "HIGH DOLLAR (HDV)", default)]
    pub hdv: Vec<Activity>,
    #[serde(rename = "LOW DOLLAR (LDV)", default)]
    pub ldv: Vec<Activity>,
    #[serde(rename = "ZERO VALUE (ZV)", default)]
    pub zv: Vec<Activity>,
}

impl GroupedActivities {
    pub fn group(&self, category: ValueCategory) -> &[Activity] {
        match category {
            ValueCategory::Hlv => &self.hlv,
            ValueCategory::Hdv => &self.hdv,
            ValueCategory::Ldv => &self.ldv,
            ValueCategory::Zv => &self.zv,
        }
    }

    fn group_mut(&mut self, category: ValueCategory) -> &mut Vec<Activity> {
        match category {
            ValueCategory::Hlv => &mut self.hlv,
            ValueCategory::Hdv => &mut self.hdv,
            ValueCategory::Ldv => &mut self.ldv,
            ValueCategory::Zv => &mut self.zv,
        }
    }

    /// Appends a new activity to `category` and returns it.
    pub fn add(&mut self, category: ValueCategory, name: &str) -> Result<&Activity, ModelError> {
        let activity = Activity::from_input(name)?;
        let group = self.group_mut(category);
        group.push(activity);
        Ok(&group[group.len() - 1])
    }

    /// Removes the activity at `index` in `category`.
    ///
    /// Schedule cells pointing at the removed activity are left untouched.
    pub fn delete(&mut self, category: ValueCategory, index: usize) -> Result<Activity, ModelError> {
        let group = self.group_mut(category);
        if index >= group.len() {
            return Err(ModelError::ActivityIndexOutOfRange {
                category,
                index,
                len: group.len(),
            });
        }
        Ok(group.remove(index))
    }

    pub fn contains(&self, category: ValueCategory, name: &str) -> bool {
        self.group(category)
            .iter()
            .any(|activity| activity.name == name)
    }

    /// Number of activities across all categories.
    pub fn total(&self) -> usize {
        ValueCategory::ALL
            .iter()
            .map(|category| self.group(*category).len())
            .sum()
    }

    /// Length of the longest category list (row count of the activities table).
    pub fn max_len(&self) -> usize {
        ValueCategory::ALL
            .iter()
            .map(|category| self.group(*category).len())
            .max()
            .unwrap_or(0)
    }

    /// All activities with their category, in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (ValueCategory, &Activity)> + '_ {
        ValueCategory::ALL.into_iter().flat_map(move |category| {
            self.group(category)
                .iter()
                .map(move |activity| (category, activity))
        })
    }
}

/// Trims and collapses whitespace; `None` when the result is empty.
pub fn normalize_name(raw: &str) -> Option<String> {
    let collapsed = WHITESPACE_RUN_RE.replace_all(raw.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, GroupedActivities};
    use crate::model::category::ValueCategory;
    use crate::model::ModelError;

    #[test]
    fn add_trims_and_uses_name_as_id() {
        let mut groups = GroupedActivities::default();
        let added = groups.add(ValueCategory::Hlv, "  Family   dinner ").unwrap();
        assert_eq!(added.name, "Family dinner");
        assert_eq!(added.id, "Family dinner");
        assert!(groups.contains(ValueCategory::Hlv, "Family dinner"));
        assert!(!groups.contains(ValueCategory::Hdv, "Family dinner"));
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut groups = GroupedActivities::default();
        assert_eq!(
            groups.add(ValueCategory::Zv, " \t ").unwrap_err(),
            ModelError::EmptyName
        );
        assert_eq!(groups.total(), 0);
    }

    #[test]
    fn delete_removes_only_the_indexed_activity() {
        let mut groups = GroupedActivities::default();
        groups.add(ValueCategory::Hdv, "Sales calls").unwrap();
        groups.add(ValueCategory::Hdv, "Proposals").unwrap();
        groups.add(ValueCategory::Ldv, "Email").unwrap();

        let removed = groups.delete(ValueCategory::Hdv, 0).unwrap();
        assert_eq!(removed.name, "Sales calls");
        assert_eq!(groups.group(ValueCategory::Hdv).len(), 1);
        assert_eq!(groups.group(ValueCategory::Hdv)[0].name, "Proposals");
        assert_eq!(groups.group(ValueCategory::Ldv).len(), 1);

        let err = groups.delete(ValueCategory::Hdv, 5).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ActivityIndexOutOfRange { index: 5, len: 1, .. }
        ));
    }

    #[test]
    fn iter_follows_canonical_category_order() {
        let mut groups = GroupedActivities::default();
        groups.add(ValueCategory::Zv, "Scrolling").unwrap();
        groups.add(ValueCategory::Hlv, "Gym").unwrap();
        groups.add(ValueCategory::Hlv, "Reading").unwrap();

        let order: Vec<(ValueCategory, &str)> = groups
            .iter()
            .map(|(category, activity)| (category, activity.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (ValueCategory::Hlv, "Gym"),
                (ValueCategory::Hlv, "Reading"),
                (ValueCategory::Zv, "Scrolling"),
            ]
        );
        assert_eq!(groups.max_len(), 2);
    }

    #[test]
    fn missing_groups_deserialize_as_empty() {
        let groups: GroupedActivities =
            serde_json::from_str(r#"{"HIGH DOLLAR (HDV)":[{"id":"x","name":"x"}]}"#).unwrap();
        assert_eq!(groups.total(), 1);
        assert!(groups.hlv.is_empty());
    }

    #[test]
    fn normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name(" a \n b ").as_deref(), Some("a b"));
        assert_eq!(normalize_name(""), None);
    }
}
