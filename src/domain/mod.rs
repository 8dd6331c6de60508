//! Domain Layer
//!
//! The pure core of simspec: configuration trees, component references and
//! the services that merge, parse and dispatch them.
//!
//! ## Structure
//!
//! - `entities/` - ConfigurationTree, ComponentReference, ModelSpecification, BranchSet
//! - `value_objects/` - Literal, Scalar, ConfigWarning
//! - `services/` - Reference parser, merger, layered resolver, dispatcher, branch expander
//! - `ports/` - The `Component` interface the external engine implements
//!
//! Nothing in this layer touches the file system.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
