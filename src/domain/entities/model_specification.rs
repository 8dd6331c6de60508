//! Model specification entity

use crate::domain::entities::{ComponentReference, ConfigurationTree};

/// Components (in declaration order) plus configuration for one run.
///
/// Component order is meaningful to the engine and is never changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSpecification {
    components: Vec<ComponentReference>,
    configuration: ConfigurationTree,
}

impl ModelSpecification {
    pub fn new(components: Vec<ComponentReference>, configuration: ConfigurationTree) -> Self {
        Self {
            components,
            configuration,
        }
    }

    pub fn components(&self) -> &[ComponentReference] {
        &self.components
    }

    pub fn configuration(&self) -> &ConfigurationTree {
        &self.configuration
    }

    /// Replace the configuration with its resolved form.
    pub fn with_configuration(self, configuration: ConfigurationTree) -> Self {
        Self {
            components: self.components,
            configuration,
        }
    }
}
