//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `SpecPipeline` - Parse, instantiate and resolve a model specification
//! - `diff_resolved` - Compare resolved configuration with and without overrides

pub mod diff;
pub mod pipeline;

pub use diff::{diff_resolved, ConfigDiff};
pub use pipeline::{PreparedRun, SpecPipeline};
