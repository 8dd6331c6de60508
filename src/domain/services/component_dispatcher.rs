//! Component instantiation dispatcher
//!
//! Resolves `ComponentReference`s against a registry of namespaces, each
//! mapping component names to factories. Lookup order for a reference:
//! 1. its declared namespace
//! 2. each ancestor of the declared namespace
//! 3. every other registered namespace, in registration order

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::domain::entities::ComponentReference;
use crate::domain::ports::{Component, ComponentFactory, FactoryError};
use crate::domain::value_objects::Literal;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("component '{name}' ({reference}) not found in any registered namespace (searched: {})", format_searched(.searched))]
pub struct UnresolvedComponentError {
    pub name: String,
    pub reference: String,
    pub searched: Vec<String>,
}

fn format_searched(searched: &[String]) -> String {
    if searched.is_empty() {
        "<no namespaces registered>".to_string()
    } else {
        searched.join(", ")
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum InstantiationError {
    #[error(transparent)]
    Unresolved(#[from] UnresolvedComponentError),

    #[error("failed to construct '{reference}': {source}")]
    Factory {
        reference: String,
        #[source]
        source: FactoryError,
    },

    #[error("duplicate component name '{name}' (declared by '{first}' and '{second}')")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}

struct Namespace {
    path: String,
    factories: BTreeMap<String, ComponentFactory>,
}

/// Registry of component factories grouped by dotted namespace.
///
/// Supplied by the simulation engine (or built from a catalog).
#[derive(Default)]
pub struct ComponentRegistry {
    namespaces: Vec<Namespace>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for namespace in &self.namespaces {
            let names: Vec<&String> = namespace.factories.keys().collect();
            map.entry(&namespace.path, &names);
        }
        map.finish()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. Re-registering a name replaces the earlier factory.
    pub fn register<F>(&mut self, namespace: &str, name: &str, factory: F)
    where
        F: Fn(&[Literal]) -> Result<Box<dyn Component>, FactoryError> + 'static,
    {
        let index = match self.namespaces.iter().position(|n| n.path == namespace) {
            Some(index) => index,
            None => {
                self.namespaces.push(Namespace {
                    path: namespace.to_string(),
                    factories: BTreeMap::new(),
                });
                self.namespaces.len() - 1
            }
        };
        self.namespaces[index]
            .factories
            .insert(name.to_string(), Box::new(factory));
    }

    pub fn with_component<F>(mut self, namespace: &str, name: &str, factory: F) -> Self
    where
        F: Fn(&[Literal]) -> Result<Box<dyn Component>, FactoryError> + 'static,
    {
        self.register(namespace, name, factory);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(|n| n.path.as_str())
    }

    pub fn component_names(&self, namespace: &str) -> Vec<&str> {
        self.namespaces
            .iter()
            .find(|n| n.path == namespace)
            .map(|n| n.factories.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn search_order(&self, reference: &ComponentReference) -> Vec<&Namespace> {
        let mut order: Vec<&Namespace> = Vec::new();
        for ancestor in reference.namespace_ancestors() {
            if let Some(namespace) = self.namespaces.iter().find(|n| n.path == ancestor) {
                order.push(namespace);
            }
        }
        for namespace in &self.namespaces {
            if !order.iter().any(|n| n.path == namespace.path) {
                order.push(namespace);
            }
        }
        order
    }

    /// Find the factory for a reference without constructing anything.
    pub fn lookup(&self, reference: &ComponentReference) -> Result<&ComponentFactory, UnresolvedComponentError> {
        let order = self.search_order(reference);
        for namespace in &order {
            if let Some(factory) = namespace.factories.get(reference.name()) {
                debug!(reference = %reference, namespace = %namespace.path, "resolved component");
                return Ok(factory);
            }
        }
        Err(UnresolvedComponentError {
            name: reference.name().to_string(),
            reference: reference.to_string(),
            searched: order.iter().map(|n| n.path.clone()).collect(),
        })
    }

    pub fn instantiate(&self, reference: &ComponentReference) -> Result<Box<dyn Component>, InstantiationError> {
        let factory = self.lookup(reference)?;
        factory(reference.args()).map_err(|source| InstantiationError::Factory {
            reference: reference.to_string(),
            source,
        })
    }

    /// Instantiate every reference in order; component names must be unique.
    pub fn instantiate_all(
        &self,
        references: &[ComponentReference],
    ) -> Result<Vec<Box<dyn Component>>, InstantiationError> {
        let mut components: Vec<Box<dyn Component>> = Vec::with_capacity(references.len());
        let mut declared_by: HashMap<String, String> = HashMap::new();

        for reference in references {
            let component = self.instantiate(reference)?;
            let name = component.name();
            if let Some(first) = declared_by.get(&name) {
                return Err(InstantiationError::DuplicateName {
                    name,
                    first: first.clone(),
                    second: reference.to_string(),
                });
            }
            declared_by.insert(name, reference.to_string());
            components.push(component);
        }

        Ok(components)
    }
}

/// Check a factory's argument count.
pub fn expect_arity(args: &[Literal], expected: usize) -> Result<(), FactoryError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(FactoryError::Arity {
            expected,
            found: args.len(),
        })
    }
}
