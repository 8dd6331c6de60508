//! YAML component catalog
//!
//! Describes the components an engine provides, so a registry can be built
//! without the engine itself:
//!
//! ```yaml
//! vivarium_public_health.results:
//!     DiseaseObserver:
//!         args: 1
//!         defaults:
//!             stratification:
//!                 "{name}":
//!                     exclude: []
//!                     include: []
//! ```
//!
//! Component names default to the snake_case class name joined with the
//! arguments by `.`; `name:` overrides that template. In `name:` and in
//! default keys, `{name}` is the component name and `{arg0}`, `{arg1}`, ...
//! are the arguments. A substituted key containing `.` expands into nested
//! mappings, so `DiseaseObserver("anemia")` above contributes
//! `stratification.disease_observer.anemia.include`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml_ng::Value;
use tracing::debug;

use crate::domain::entities::{ConfigValue, ConfigurationTree};
use crate::domain::ports::{Component, FactoryError};
use crate::domain::services::{expect_arity, ComponentRegistry};
use crate::domain::value_objects::Literal;
use crate::error::{ParseError, SimSpecResult};
use crate::parser::{parse_yaml_value, tree_from_yaml};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    #[serde(default)]
    args: usize,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    defaults: Value,
}

/// A component described by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogComponent {
    name: String,
    defaults: ConfigurationTree,
}

impl CatalogComponent {
    pub fn new(name: impl Into<String>, defaults: ConfigurationTree) -> Self {
        Self {
            name: name.into(),
            defaults,
        }
    }
}

impl Component for CatalogComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn configuration_defaults(&self) -> ConfigurationTree {
        self.defaults.clone()
    }
}

/// Build a registry from catalog YAML. Namespaces register in document order.
pub fn parse_catalog(content: &str, origin: &str) -> Result<ComponentRegistry, ParseError> {
    let document = parse_yaml_value(content, origin)?;
    let mut registry = ComponentRegistry::new();

    let namespaces = match &document {
        Value::Null => return Ok(registry),
        Value::Mapping(namespaces) => namespaces,
        _ => {
            return Err(ParseError::InvalidCatalogEntry {
                key: origin.to_string(),
                message: "catalog must map namespaces to components".to_string(),
            })
        }
    };

    for (namespace, components) in namespaces {
        let namespace = catalog_key(namespace, origin)?;
        let components = match components {
            Value::Null => continue,
            Value::Mapping(components) => components,
            _ => {
                return Err(ParseError::InvalidCatalogEntry {
                    key: namespace,
                    message: "expected a mapping of component names".to_string(),
                })
            }
        };

        for (class_name, entry) in components {
            let class_name = catalog_key(class_name, &namespace)?;
            let key = format!("{}.{}", namespace, class_name);

            let entry: CatalogEntry = match entry {
                Value::Null => CatalogEntry::default(),
                other => serde_yaml_ng::from_value(other.clone()).map_err(|e| {
                    ParseError::InvalidCatalogEntry {
                        key: key.clone(),
                        message: e.to_string(),
                    }
                })?,
            };
            let defaults = match &entry.defaults {
                Value::Null => ConfigurationTree::new(),
                value => tree_from_yaml(value, "").map_err(|e| ParseError::InvalidCatalogEntry {
                    key: key.clone(),
                    message: e.to_string(),
                })?,
            };

            debug!(component = %key, args = entry.args, "registering catalog component");
            register_entry(&mut registry, &namespace, &class_name, entry.args, entry.name, defaults);
        }
    }

    Ok(registry)
}

pub fn load_catalog(path: &Path) -> SimSpecResult<ComponentRegistry> {
    let content = fs::read_to_string(path)?;
    Ok(parse_catalog(&content, &path.display().to_string())?)
}

fn register_entry(
    registry: &mut ComponentRegistry,
    namespace: &str,
    class_name: &str,
    arity: usize,
    name_template: Option<String>,
    defaults: ConfigurationTree,
) {
    let base_name = snake_case(class_name);
    registry.register(namespace, class_name, move |args: &[Literal]| {
        expect_arity(args, arity)?;
        let parts: Vec<String> = args.iter().map(Literal::as_name_part).collect();

        let name = match &name_template {
            Some(template) => substitute(template, "", &parts),
            None => std::iter::once(base_name.clone())
                .chain(parts.iter().cloned())
                .collect::<Vec<_>>()
                .join("."),
        };
        if name.is_empty() {
            return Err(FactoryError::InvalidArgument {
                position: 0,
                message: "component name is empty".to_string(),
            });
        }

        let defaults = substitute_keys(&defaults, &name, &parts)
            .map_err(|message| FactoryError::InvalidDefaults { message })?;
        Ok(Box::new(CatalogComponent::new(name, defaults)) as Box<dyn Component>)
    });
}

fn catalog_key(key: &Value, parent: &str) -> Result<String, ParseError> {
    match key {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ParseError::InvalidCatalogEntry {
            key: parent.to_string(),
            message: "keys must be non-empty strings".to_string(),
        }),
    }
}

/// `DiseaseObserver` -> `disease_observer`, `MaternalBMIObserver` -> `maternal_bmi_observer`.
pub fn snake_case(class_name: &str) -> String {
    let chars: Vec<char> = class_name.chars().collect();
    let mut out = String::with_capacity(class_name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map(|n| n.is_lowercase()).unwrap_or(false);
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

fn substitute(template: &str, name: &str, args: &[String]) -> String {
    let mut out = template.replace("{name}", name);
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{arg{}}}", i), arg);
    }
    out
}

fn substitute_keys(tree: &ConfigurationTree, name: &str, args: &[String]) -> Result<ConfigurationTree, String> {
    let mut out = ConfigurationTree::new();
    for (key, value) in tree {
        let value = match value {
            ConfigValue::Mapping(child) => ConfigValue::Mapping(substitute_keys(child, name, args)?),
            other => other.clone(),
        };
        let key = substitute(key, name, args);
        if key.split('.').any(str::is_empty) {
            return Err(format!("key '{}' has an empty segment", key));
        }
        if out.set_path(&key, value).map_err(|e| e.to_string())?.is_some() {
            return Err(format!("key '{}' appears more than once", key));
        }
    }
    Ok(out)
}
