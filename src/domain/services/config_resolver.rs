//! Layered configuration resolver
//!
//! Merges named layers from lowest to highest priority and records, for
//! every leaf, which layer (and which file or component) set it:
//!
//! 1. `base` - framework defaults
//! 2. `component_configs` - defaults declared by instantiated components
//! 3. `model_override` - the model specification's `configuration` section
//! 4. `override` - scenario files, branch trees and `--set` values

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::domain::entities::{join_path, ConfigValue, ConfigurationTree};
use crate::domain::services::config_merger::{merge_into, MergeEvent};
use crate::domain::services::suggestion::suggest_key;
use crate::domain::value_objects::ConfigWarning;
use crate::error::ConfigurationError;

pub const BASE_LAYER: &str = "base";
pub const COMPONENT_LAYER: &str = "component_configs";
pub const MODEL_LAYER: &str = "model_override";
pub const OVERRIDE_LAYER: &str = "override";

/// How trees inside one layer interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPolicy {
    /// Later trees in the layer override earlier ones silently.
    Shared,
    /// Two origins may not set the same leaf.
    Exclusive,
    /// Like `Shared`, and keys unknown to lower layers produce warnings.
    Overriding,
}

/// Which layer and origin set a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSource {
    pub layer: String,
    pub origin: String,
}

impl fmt::Display for LeafSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.layer, self.origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideInfo {
    pub path: String,
    pub from: LeafSource,
    pub by: LeafSource,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfiguration {
    pub tree: ConfigurationTree,
    pub sources: BTreeMap<String, LeafSource>,
    pub overrides: Vec<OverrideInfo>,
    pub warnings: Vec<ConfigWarning>,
}

impl ResolvedConfiguration {
    pub fn source_of(&self, path: &str) -> Option<&LeafSource> {
        self.sources.get(path)
    }

    pub fn value_with_source(&self, path: &str) -> Option<(&ConfigValue, Option<&LeafSource>)> {
        self.tree.get(path).map(|value| (value, self.sources.get(path)))
    }
}

#[derive(Debug, Clone)]
struct ConfigLayer {
    name: String,
    policy: LayerPolicy,
    trees: Vec<(String, ConfigurationTree)>,
}

#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    layers: Vec<ConfigLayer>,
    warn_unknown_keys: bool,
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationResolver {
    /// A resolver with no layers.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            warn_unknown_keys: true,
        }
    }

    /// The four standard layers, lowest priority first.
    pub fn standard() -> Self {
        Self::new()
            .with_layer(BASE_LAYER, LayerPolicy::Shared)
            .with_layer(COMPONENT_LAYER, LayerPolicy::Exclusive)
            .with_layer(MODEL_LAYER, LayerPolicy::Overriding)
            .with_layer(OVERRIDE_LAYER, LayerPolicy::Overriding)
    }

    pub fn with_layer(mut self, name: impl Into<String>, policy: LayerPolicy) -> Self {
        self.layers.push(ConfigLayer {
            name: name.into(),
            policy,
            trees: Vec::new(),
        });
        self
    }

    /// Unknown-key warnings only make sense when the lower layers are
    /// complete (i.e. component defaults were collected).
    pub fn with_unknown_key_warnings(mut self, enabled: bool) -> Self {
        self.warn_unknown_keys = enabled;
        self
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// Queue a tree on a layer. Trees in one layer apply in insertion order.
    pub fn add(
        &mut self,
        layer: &str,
        origin: impl Into<String>,
        tree: ConfigurationTree,
    ) -> Result<(), ConfigurationError> {
        let target = self
            .layers
            .iter_mut()
            .find(|l| l.name == layer)
            .ok_or_else(|| ConfigurationError::UnknownLayer {
                layer: layer.to_string(),
            })?;
        target.trees.push((origin.into(), tree));
        Ok(())
    }

    pub fn resolve(&self) -> Result<ResolvedConfiguration, ConfigurationError> {
        let mut tree = ConfigurationTree::new();
        let mut sources: BTreeMap<String, LeafSource> = BTreeMap::new();
        let mut overrides: Vec<OverrideInfo> = Vec::new();
        let mut warnings: Vec<ConfigWarning> = Vec::new();

        for layer in &self.layers {
            debug!(layer = %layer.name, trees = layer.trees.len(), "merging configuration layer");

            let mut claimed: BTreeMap<String, String> = BTreeMap::new();
            let warn = layer.policy == LayerPolicy::Overriding && self.warn_unknown_keys;

            for (origin, overlay) in &layer.trees {
                if layer.policy == LayerPolicy::Exclusive {
                    claim_leaves(&mut claimed, origin, overlay)?;
                }

                let source = LeafSource {
                    layer: layer.name.clone(),
                    origin: origin.clone(),
                };

                merge_into(&mut tree, overlay, "", &mut |event| match event {
                    MergeEvent::Added {
                        path,
                        value,
                        siblings,
                    } => {
                        // An empty mapping is an open slot (e.g. excluded_categories: {})
                        if warn && !siblings.is_empty() {
                            let key = path.rsplit('.').next().unwrap_or(path);
                            warnings.push(ConfigWarning {
                                path: path.to_string(),
                                origin: origin.clone(),
                                suggestion: suggest_key(key, siblings.keys()),
                            });
                        }
                        record_leaves(&mut sources, path, value, &source);
                    }
                    MergeEvent::Replaced {
                        path,
                        previous,
                        value,
                    } => {
                        if previous != value {
                            if let Some(from) = sources.get(path) {
                                overrides.push(OverrideInfo {
                                    path: path.to_string(),
                                    from: from.clone(),
                                    by: source.clone(),
                                });
                            }
                        }
                        record_leaves(&mut sources, path, value, &source);
                    }
                })?;
            }
        }

        let leaf_paths: BTreeSet<String> = tree.leaves().into_iter().map(|(p, _)| p).collect();
        sources.retain(|path, _| leaf_paths.contains(path));

        Ok(ResolvedConfiguration {
            tree,
            sources,
            overrides,
            warnings,
        })
    }
}

fn claim_leaves(
    claimed: &mut BTreeMap<String, String>,
    origin: &str,
    overlay: &ConfigurationTree,
) -> Result<(), ConfigurationError> {
    for (path, _) in overlay.leaves() {
        match claimed.get(&path) {
            Some(first) if first != origin => {
                return Err(ConfigurationError::DuplicateDefault {
                    path,
                    first: first.clone(),
                    second: origin.to_string(),
                });
            }
            Some(_) => {}
            None => {
                claimed.insert(path, origin.to_string());
            }
        }
    }
    Ok(())
}

fn record_leaves(
    sources: &mut BTreeMap<String, LeafSource>,
    path: &str,
    value: &ConfigValue,
    source: &LeafSource,
) {
    match value {
        ConfigValue::Mapping(tree) if !tree.is_empty() => {
            for (sub_path, _) in tree.leaves() {
                sources.insert(join_path(path, &sub_path), source.clone());
            }
        }
        _ => {
            sources.insert(path.to_string(), source.clone());
        }
    }
}
