//! Domain Services
//!
//! Pure logic that operates on domain entities. No I/O.

pub mod branch_expander;
pub mod component_dispatcher;
pub mod config_merger;
pub mod config_resolver;
pub mod reference_parser;
pub mod suggestion;

pub use branch_expander::{expand_branches, expand_templates};
pub use component_dispatcher::{
    expect_arity, ComponentRegistry, InstantiationError, UnresolvedComponentError,
};
pub use config_merger::{merge, merge_all, merge_into, MergeEvent};
pub use config_resolver::{
    ConfigurationResolver, LayerPolicy, LeafSource, OverrideInfo, ResolvedConfiguration,
    BASE_LAYER, COMPONENT_LAYER, MODEL_LAYER, OVERRIDE_LAYER,
};
pub use reference_parser::parse_component_reference;
pub use suggestion::suggest_key;
