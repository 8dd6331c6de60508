//! Built-in framework defaults
//!
//! The lowest configuration layer. Component defaults, the model
//! specification and overrides all merge on top of this tree.

use crate::domain::entities::ConfigurationTree;
use crate::error::SimSpecResult;
use crate::parser::{load_configuration_file, parse_configuration};

use super::types::Settings;

pub const BUILTIN_ORIGIN: &str = "<built-in defaults>";

/// Framework defaults as a model-spec author would write them.
pub const BASE_CONFIGURATION: &str = r#"
input_data:
    artifact_path: null
    artifact_filter_term: null
    input_draw_number: 0
    location: null
interpolation:
    order: 0
    validate: true
    extrapolate: true
randomness:
    map_size: 1_000_000
    key_columns: []
    random_seed: 0
    additional_seed: null
    rate_conversion_type: linear
time:
    start:
        year: 2005
        month: 7
        day: 2
    end:
        year: 2010
        month: 7
        day: 2
    step_size: 1
    standard_step_size: null
population:
    population_size: 100
    initialization_age_min: 0
    initialization_age_max: 125
    untracking_age: null
    include_sex: Both
stratification:
    default: []
    excluded_categories: {}
"#;

/// The built-in base tree.
pub fn builtin_base() -> SimSpecResult<ConfigurationTree> {
    Ok(parse_configuration(BASE_CONFIGURATION, BUILTIN_ORIGIN)?)
}

/// The base tree and its origin label, honouring `[base] path`.
pub fn base_configuration(settings: &Settings) -> SimSpecResult<(String, ConfigurationTree)> {
    match &settings.base.path {
        Some(path) => Ok((path.display().to_string(), load_configuration_file(path)?)),
        None => Ok((BUILTIN_ORIGIN.to_string(), builtin_base()?)),
    }
}
