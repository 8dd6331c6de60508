//! simspec - model specification loader for component-based simulations
//!
//! Reads a YAML model specification (components + configuration), turns each
//! `Name(args)` component reference into an instantiated component through a
//! registry of factories, and resolves the layered configuration tree the
//! simulation engine runs with.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod parser;
pub mod presentation;

// Re-exports for convenience
pub use application::{PreparedRun, SpecPipeline};
pub use config::Settings;
pub use domain::entities::{
    BranchSet, ComponentReference, ConfigValue, ConfigurationTree, ModelSpecification,
};
pub use domain::ports::{Component, ComponentFactory, FactoryError};
pub use domain::services::{
    merge, merge_all, parse_component_reference, ComponentRegistry, ConfigurationResolver,
    InstantiationError, ResolvedConfiguration, UnresolvedComponentError,
};
pub use domain::value_objects::{ConfigWarning, Literal, Scalar};
pub use error::{ConfigurationError, ParseError, SimSpecError, SimSpecResult, ValueShape};
pub use infrastructure::{load_catalog, parse_catalog};
pub use parser::{parse_override, ModelSpecLoader};
