//! Resolved configuration diff
//!
//! Shows what a set of overrides changes: the resolved tree without them
//! against the resolved tree with them, as a unified YAML diff plus the
//! list of leaf paths whose values differ.

use std::collections::BTreeMap;

use similar::{ChangeTag, TextDiff};

use crate::domain::entities::{ConfigValue, ConfigurationTree};
use crate::error::SimSpecResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    pub unified: String,
    pub additions: usize,
    pub deletions: usize,
    /// Leaf paths added, removed or changed, sorted
    pub changed_paths: Vec<String>,
}

impl ConfigDiff {
    pub fn has_changes(&self) -> bool {
        !self.changed_paths.is_empty()
    }

    /// e.g. "+5, -3"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

pub fn diff_resolved(
    before: &ConfigurationTree,
    after: &ConfigurationTree,
    label: &str,
) -> SimSpecResult<ConfigDiff> {
    let old = serde_yaml_ng::to_string(before)?;
    let new = serde_yaml_ng::to_string(after)?;

    let text_diff = TextDiff::from_lines(&old, &new);
    let mut diff = ConfigDiff::default();
    for change in text_diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => diff.deletions += 1,
            ChangeTag::Insert => diff.additions += 1,
            ChangeTag::Equal => {}
        }
    }

    diff.unified = text_diff
        .unified_diff()
        .header(&format!("a/{}", label), &format!("b/{}", label))
        .to_string();
    diff.changed_paths = changed_leaves(before, after);
    Ok(diff)
}

fn changed_leaves(before: &ConfigurationTree, after: &ConfigurationTree) -> Vec<String> {
    let old: BTreeMap<String, &ConfigValue> = before.leaves().into_iter().collect();
    let new: BTreeMap<String, &ConfigValue> = after.leaves().into_iter().collect();

    let mut changed: Vec<String> = old
        .iter()
        .filter(|&(path, value)| new.get(path) != Some(value))
        .map(|(path, _)| path.clone())
        .collect();
    changed.extend(new.keys().filter(|path| !old.contains_key(*path)).cloned());
    changed.sort();
    changed
}
