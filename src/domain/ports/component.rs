//! Component port
//!
//! The common interface every instantiated component exposes to the loader.
//! Everything else a component does belongs to the engine.

use std::fmt;

use crate::domain::entities::ConfigurationTree;
use crate::domain::value_objects::Literal;

pub trait Component: fmt::Debug {
    /// Unique name within one model specification, e.g. `disease_observer.anemia`.
    fn name(&self) -> String;

    /// Defaults this component contributes to the `component_configs` layer.
    fn configuration_defaults(&self) -> ConfigurationTree {
        ConfigurationTree::new()
    }
}

/// Builds a component from the literal arguments of its reference.
pub type ComponentFactory = Box<dyn Fn(&[Literal]) -> Result<Box<dyn Component>, FactoryError>>;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum FactoryError {
    #[error("expected {expected} argument(s), got {found}")]
    Arity { expected: usize, found: usize },

    #[error("invalid argument {position}: {message}")]
    InvalidArgument { position: usize, message: String },

    #[error("invalid configuration defaults: {message}")]
    InvalidDefaults { message: String },
}
