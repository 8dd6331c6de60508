//! Domain Entities
//!
//! - `ConfigurationTree` - Nested configuration mapping with tagged values
//! - `ComponentReference` - Parsed `Name(args)` component declaration
//! - `ModelSpecification` - Ordered components plus configuration for one run
//! - `BranchSet` - Batch of scenario branches crossed with draws and seeds

mod branch_set;
mod component_reference;
mod configuration_tree;
mod model_specification;

pub use branch_set::{BranchSet, INPUT_DRAW_PATH, RANDOM_SEED_PATH};
pub use component_reference::ComponentReference;
pub use configuration_tree::{join_path, ConfigValue, ConfigurationTree};
pub use model_specification::ModelSpecification;
