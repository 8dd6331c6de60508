//! Model specification parser
//!
//! Reads YAML model specifications, configuration override files and branch
//! files into domain types. Component reference strings are handed to the
//! reference grammar in `domain::services::reference_parser`.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_yaml_ng::Value;
use tracing::debug;

use crate::domain::entities::{
    join_path, BranchSet, ComponentReference, ConfigValue, ConfigurationTree, ModelSpecification,
};
use crate::domain::services::parse_component_reference;
use crate::domain::value_objects::Scalar;
use crate::error::{ConfigurationError, ParseError, SimSpecResult, ValueShape};

pub const COMPONENTS_KEY: &str = "components";
pub const CONFIGURATION_KEY: &str = "configuration";

const INPUT_DRAW_COUNT_KEY: &str = "input_draw_count";
const RANDOM_SEED_COUNT_KEY: &str = "random_seed_count";
const BRANCHES_KEY: &str = "branches";

/// Loads model specifications, checking namespaces against a known set.
///
/// An empty known set accepts any namespace.
#[derive(Debug, Clone, Default)]
pub struct ModelSpecLoader {
    known_namespaces: BTreeSet<String>,
}

impl ModelSpecLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn known_namespaces(&self) -> impl Iterator<Item = &str> {
        self.known_namespaces.iter().map(String::as_str)
    }

    /// Parse a model specification from YAML text.
    ///
    /// `origin` names the document in error messages (usually the file path).
    pub fn parse_str(&self, content: &str, origin: &str) -> Result<ModelSpecification, ParseError> {
        let document = parse_yaml_value(content, origin)?;

        let root = match &document {
            Value::Null => return Ok(ModelSpecification::default()),
            Value::Mapping(root) => root,
            other => {
                return Err(ParseError::NotAMapping {
                    origin: origin.to_string(),
                    found: yaml_shape(other),
                })
            }
        };

        let mut components = Vec::new();
        let mut configuration = ConfigurationTree::new();

        for (key, value) in root {
            let key = key_to_string(key, "")?;
            match key.as_str() {
                COMPONENTS_KEY => self.collect_components(value, "", &mut components)?,
                CONFIGURATION_KEY => {
                    configuration = match value {
                        Value::Null => ConfigurationTree::new(),
                        Value::Mapping(_) => tree_from_yaml(value, "")?,
                        other => {
                            return Err(ParseError::InvalidSection {
                                key,
                                message: format!("expected a mapping, found {}", yaml_shape(other)),
                            })
                        }
                    };
                }
                _ => return Err(ParseError::UnknownSection { key }),
            }
        }

        debug!(
            origin,
            components = components.len(),
            configuration_keys = configuration.len(),
            "parsed model specification"
        );

        Ok(ModelSpecification::new(components, configuration))
    }

    /// Read and parse a model specification file.
    pub fn load_file(&self, path: &Path) -> SimSpecResult<ModelSpecification> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content, &path.display().to_string())?)
    }

    fn collect_components(
        &self,
        value: &Value,
        prefix: &str,
        out: &mut Vec<ComponentReference>,
    ) -> Result<(), ParseError> {
        match value {
            // A namespace whose entries are all commented out parses as null
            Value::Null => Ok(()),
            Value::Mapping(mapping) => {
                for (key, child) in mapping {
                    let key = key_to_string(key, &join_path(COMPONENTS_KEY, prefix))?;
                    if prefix.is_empty() {
                        self.check_namespace(&key)?;
                    }
                    self.collect_components(child, &join_path(prefix, &key), out)?;
                }
                Ok(())
            }
            Value::Sequence(_) if prefix.is_empty() => Err(ParseError::InvalidComponentEntry {
                key: COMPONENTS_KEY.to_string(),
                message: "components must be grouped under a namespace".to_string(),
            }),
            Value::Sequence(items) => {
                for item in items {
                    match item {
                        Value::String(text) if text.trim_start().starts_with('#') => {
                            debug!(entry = %text, "skipping commented-out component");
                        }
                        Value::String(text) => out.push(parse_component_reference(text, prefix)?),
                        other => {
                            return Err(ParseError::InvalidComponentEntry {
                                key: join_path(COMPONENTS_KEY, prefix),
                                message: format!(
                                    "expected a component reference string, found {}",
                                    yaml_kind(other)
                                ),
                            })
                        }
                    }
                }
                Ok(())
            }
            other => Err(ParseError::InvalidComponentEntry {
                key: join_path(COMPONENTS_KEY, prefix),
                message: format!(
                    "expected a list of component references or a mapping of modules, found {}",
                    yaml_kind(other)
                ),
            }),
        }
    }

    fn check_namespace(&self, key: &str) -> Result<(), ParseError> {
        if self.known_namespaces.is_empty() || self.known_namespaces.contains(key) {
            return Ok(());
        }
        let known: Vec<&str> = self.known_namespaces().collect();
        Err(ParseError::UnknownNamespace {
            key: key.to_string(),
            known: known.join(", "),
        })
    }
}

/// Parse YAML text, formatting syntax errors with their location.
pub fn parse_yaml_value(content: &str, origin: &str) -> Result<Value, ParseError> {
    serde_yaml_ng::from_str(content).map_err(|e| ParseError::Yaml {
        origin: origin.to_string(),
        message: format_yaml_error(content, &e),
    })
}

/// Parse a configuration override document.
///
/// Accepts either a bare configuration tree or a document whose only key is
/// `configuration`.
pub fn parse_configuration(content: &str, origin: &str) -> Result<ConfigurationTree, ParseError> {
    let document = parse_yaml_value(content, origin)?;
    match &document {
        Value::Null => Ok(ConfigurationTree::new()),
        Value::Mapping(root) => {
            if root.len() == 1 {
                if let Some(inner) = root.get(CONFIGURATION_KEY) {
                    return match inner {
                        Value::Null => Ok(ConfigurationTree::new()),
                        Value::Mapping(_) => tree_from_yaml(inner, ""),
                        other => Err(ParseError::InvalidSection {
                            key: CONFIGURATION_KEY.to_string(),
                            message: format!("expected a mapping, found {}", yaml_shape(other)),
                        }),
                    };
                }
            }
            tree_from_yaml(&document, "")
        }
        other => Err(ParseError::NotAMapping {
            origin: origin.to_string(),
            found: yaml_shape(other),
        }),
    }
}

pub fn load_configuration_file(path: &Path) -> SimSpecResult<ConfigurationTree> {
    let content = fs::read_to_string(path)?;
    Ok(parse_configuration(&content, &path.display().to_string())?)
}

/// Parse `dotted.key.path=value` into a single-leaf tree.
///
/// The value is read as YAML, so `[age, sex]` is a list and `10_000` an
/// integer; an empty value is `null`.
pub fn parse_override(text: &str) -> Result<ConfigurationTree, ParseError> {
    let invalid = |message: &str| ParseError::InvalidOverride {
        text: text.to_string(),
        message: message.to_string(),
    };

    let (path, raw_value) = text
        .split_once('=')
        .ok_or_else(|| invalid("expected KEY=VALUE"))?;
    let path = path.trim();

    if path.is_empty() {
        return Err(invalid("empty key"));
    }
    if path
        .split('.')
        .any(|segment| segment.is_empty() || segment.chars().any(char::is_whitespace))
    {
        return Err(invalid("key segments must be non-empty and contain no whitespace"));
    }

    let raw_value = raw_value.trim();
    let value = match serde_yaml_ng::from_str::<Value>(raw_value) {
        Ok(parsed) => config_value_from_yaml(&parsed, path)?,
        Err(_) => ConfigValue::Scalar(Scalar::Str(raw_value.to_string())),
    };

    let mut tree = ConfigurationTree::new();
    tree.set_path(path, value)
        .map_err(|e| invalid(&e.to_string()))?;
    Ok(tree)
}

/// Parse a branches document (`input_draw_count`, `random_seed_count`, `branches`).
pub fn parse_branches(content: &str, origin: &str) -> SimSpecResult<BranchSet> {
    let document = parse_yaml_value(content, origin)?;
    let root = match &document {
        Value::Null => return Ok(BranchSet::default()),
        Value::Mapping(root) => root,
        other => {
            return Err(ParseError::NotAMapping {
                origin: origin.to_string(),
                found: yaml_shape(other),
            }
            .into())
        }
    };

    let mut input_draw_count = 1;
    let mut random_seed_count = 1;
    let mut templates = Vec::new();

    for (key, value) in root {
        let key = key_to_string(key, "")?;
        match key.as_str() {
            INPUT_DRAW_COUNT_KEY => input_draw_count = parse_count(&key, value)?,
            RANDOM_SEED_COUNT_KEY => random_seed_count = parse_count(&key, value)?,
            BRANCHES_KEY => match value {
                Value::Null => {}
                Value::Sequence(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let path = format!("{}[{}]", BRANCHES_KEY, index);
                        match item {
                            Value::Mapping(_) => templates.push(tree_from_yaml(item, &path)?),
                            other => {
                                return Err(ParseError::InvalidSection {
                                    key: path,
                                    message: format!(
                                        "expected a mapping, found {}",
                                        yaml_shape(other)
                                    ),
                                }
                                .into())
                            }
                        }
                    }
                }
                other => {
                    return Err(ParseError::InvalidSection {
                        key,
                        message: format!("expected a list, found {}", yaml_shape(other)),
                    }
                    .into())
                }
            },
            _ => {
                return Err(ParseError::InvalidSection {
                    key,
                    message: format!(
                        "unknown branches key (expected '{}', '{}' or '{}')",
                        INPUT_DRAW_COUNT_KEY, RANDOM_SEED_COUNT_KEY, BRANCHES_KEY
                    ),
                }
                .into())
            }
        }
    }

    Ok(BranchSet::new(input_draw_count, random_seed_count, templates)?)
}

pub fn load_branches_file(path: &Path) -> SimSpecResult<BranchSet> {
    let content = fs::read_to_string(path)?;
    parse_branches(&content, &path.display().to_string())
}

fn parse_count(key: &str, value: &Value) -> Result<u32, ConfigurationError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ConfigurationError::InvalidBranches {
            message: format!("'{}' must be a non-negative integer", key),
        })
}

/// Convert a YAML mapping into a configuration tree.
///
/// `path` is the dotted location of `value`, used in error messages.
pub fn tree_from_yaml(value: &Value, path: &str) -> Result<ConfigurationTree, ParseError> {
    match config_value_from_yaml(value, path)? {
        ConfigValue::Mapping(tree) => Ok(tree),
        other => Err(ParseError::InvalidSection {
            key: if path.is_empty() { CONFIGURATION_KEY.to_string() } else { path.to_string() },
            message: format!("expected a mapping, found {}", other.shape()),
        }),
    }
}

pub fn config_value_from_yaml(value: &Value, path: &str) -> Result<ConfigValue, ParseError> {
    let converted = match value {
        Value::Null => ConfigValue::Scalar(Scalar::Null),
        Value::Bool(b) => ConfigValue::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => {
            let scalar = if let Some(i) = n.as_i64() {
                Scalar::Int(i)
            } else {
                n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null)
            };
            ConfigValue::Scalar(scalar)
        }
        Value::String(s) => ConfigValue::Scalar(Scalar::from_plain_str(s)),
        Value::Sequence(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                converted.push(config_value_from_yaml(item, &format!("{}[{}]", path, index))?);
            }
            ConfigValue::List(converted)
        }
        Value::Mapping(mapping) => {
            let mut tree = ConfigurationTree::new();
            for (key, child) in mapping {
                let key = config_key(key, path)?;
                let child_path = join_path(path, &key);
                let child = config_value_from_yaml(child, &child_path)?;
                if tree.insert(key, child).is_some() {
                    return Err(ParseError::InvalidKey {
                        path: child_path,
                        message: "key appears more than once".to_string(),
                    });
                }
            }
            ConfigValue::Mapping(tree)
        }
        Value::Tagged(tagged) => config_value_from_yaml(&tagged.value, path)?,
    };
    Ok(converted)
}

fn key_to_string(key: &Value, parent: &str) -> Result<String, ParseError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ParseError::InvalidKey {
            path: if parent.is_empty() { "<root>".to_string() } else { parent.to_string() },
            message: format!("mapping keys must be scalars, found {}", yaml_kind(other)),
        }),
    }
}

/// Configuration keys are path segments, so they may not be empty or dotted.
fn config_key(key: &Value, parent: &str) -> Result<String, ParseError> {
    let key = key_to_string(key, parent)?;
    let problem = if key.is_empty() {
        "keys may not be empty"
    } else if key.contains('.') {
        "keys may not contain '.'; nest the mapping instead"
    } else {
        return Ok(key);
    };
    Err(ParseError::InvalidKey {
        path: join_path(parent, &key),
        message: problem.to_string(),
    })
}

fn yaml_shape(value: &Value) -> ValueShape {
    match value {
        Value::Sequence(_) => ValueShape::List,
        Value::Mapping(_) => ValueShape::Mapping,
        Value::Tagged(tagged) => yaml_shape(&tagged.value),
        _ => ValueShape::Scalar,
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn format_yaml_error(content: &str, err: &serde_yaml_ng::Error) -> String {
    let mut message = String::new();

    match err.location() {
        Some(location) => {
            message.push_str(&format!("line {}: {}", location.line(), err));
        }
        None => message.push_str(&err.to_string()),
    }

    if content.lines().any(|line| line.starts_with('\t')) {
        message.push_str("\nHint: YAML does not allow tabs for indentation");
    }

    message
}
