//! Configuration tree entity
//!
//! A recursive tagged tree: every value is a scalar, a list or a nested
//! mapping. Keeping the shape in the type makes the override rule in the
//! merger a structural check.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::value_objects::Scalar;
use crate::error::{ConfigurationError, ValueShape};

/// A single value inside a [`ConfigurationTree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    List(Vec<ConfigValue>),
    Mapping(ConfigurationTree),
}

impl ConfigValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            ConfigValue::Scalar(_) => ValueShape::Scalar,
            ConfigValue::List(_) => ValueShape::List,
            ConfigValue::Mapping(_) => ValueShape::Mapping,
        }
    }

    /// `null` is an undeclared slot: it accepts an override of any shape.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Scalar(Scalar::Null))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ConfigurationTree> {
        match self {
            ConfigValue::Mapping(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Render a non-mapping value on one line (flow style for lists).
    pub fn to_inline_string(&self) -> String {
        match self {
            ConfigValue::Scalar(scalar) => scalar.to_string(),
            ConfigValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_inline_string()).collect();
                format!("[{}]", parts.join(", "))
            }
            ConfigValue::Mapping(tree) => {
                let parts: Vec<String> = tree
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.to_inline_string()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<Scalar> for ConfigValue {
    fn from(value: Scalar) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Scalar(Scalar::Bool(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::List(value)
    }
}

impl From<ConfigurationTree> for ConfigValue {
    fn from(value: ConfigurationTree) -> Self {
        ConfigValue::Mapping(value)
    }
}

/// Nested mapping from unique string keys to [`ConfigValue`]s.
///
/// Keys are kept sorted so rendered output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigurationTree {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigurationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.entries.iter()
    }

    pub fn get_key(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries.get_mut(key)
    }

    /// Insert a value at a single key, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a dotted path such as `time.start.year`.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.entries.get(segment)?;
        }
        Some(current)
    }

    /// Set a dotted path, creating intermediate mappings as needed.
    ///
    /// Fails when an intermediate segment already holds a non-mapping value
    /// (other than `null`).
    pub fn set_path(
        &mut self,
        path: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<Option<ConfigValue>, ConfigurationError> {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (parents.split('.').collect::<Vec<_>>(), last),
            None => (Vec::new(), path),
        };

        let mut current = self;
        let mut walked = String::new();
        for segment in parents {
            walked = join_path(&walked, segment);
            let slot = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| ConfigValue::Mapping(ConfigurationTree::new()));
            if slot.is_null() {
                *slot = ConfigValue::Mapping(ConfigurationTree::new());
            }
            current = match slot {
                ConfigValue::Mapping(tree) => tree,
                other => {
                    return Err(ConfigurationError::TypeMismatch {
                        path: walked,
                        expected: other.shape(),
                        found: ValueShape::Mapping,
                    })
                }
            };
        }

        Ok(current.entries.insert(last.to_string(), value.into()))
    }

    /// All leaves as `(dotted path, value)` pairs in sorted path order.
    ///
    /// A leaf is any scalar or list, plus empty mappings (which would
    /// otherwise vanish from provenance and diffs).
    pub fn leaves(&self) -> Vec<(String, &ConfigValue)> {
        let mut out = Vec::new();
        collect_leaves(self, "", &mut out);
        out
    }
}

fn collect_leaves<'a>(tree: &'a ConfigurationTree, prefix: &str, out: &mut Vec<(String, &'a ConfigValue)>) {
    for (key, value) in &tree.entries {
        let path = join_path(prefix, key);
        match value {
            ConfigValue::Mapping(child) if !child.is_empty() => collect_leaves(child, &path, out),
            _ => out.push((path, value)),
        }
    }
}

/// Join a dotted prefix and a key.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigurationTree {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConfigurationTree {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = btree_map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests;
