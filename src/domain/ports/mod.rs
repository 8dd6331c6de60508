//! Domain Ports (Interfaces)
//!
//! The external simulation engine implements these; the domain only
//! depends on the traits.

pub mod component;

pub use component::{Component, ComponentFactory, FactoryError};
