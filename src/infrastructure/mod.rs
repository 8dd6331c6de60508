//! Infrastructure Layer
//!
//! File-backed implementations behind the domain types.
//!
//! ## Structure
//!
//! - `catalog` - YAML component catalog loaded into a `ComponentRegistry`

pub mod catalog;

// Re-export for convenience
pub use catalog::{load_catalog, parse_catalog, snake_case, CatalogComponent};
