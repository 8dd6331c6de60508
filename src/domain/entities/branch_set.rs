//! Branch set entity
//!
//! A batch of runs: scenario branch templates crossed with input draws and
//! random seeds.

use crate::domain::entities::ConfigurationTree;
use crate::error::ConfigurationError;

pub const INPUT_DRAW_PATH: &str = "input_data.input_draw_number";
pub const RANDOM_SEED_PATH: &str = "randomness.random_seed";

#[derive(Debug, Clone, PartialEq)]
pub struct BranchSet {
    input_draw_count: u32,
    random_seed_count: u32,
    templates: Vec<ConfigurationTree>,
}

impl Default for BranchSet {
    fn default() -> Self {
        Self {
            input_draw_count: 1,
            random_seed_count: 1,
            templates: Vec::new(),
        }
    }
}

impl BranchSet {
    pub fn new(
        input_draw_count: u32,
        random_seed_count: u32,
        templates: Vec<ConfigurationTree>,
    ) -> Result<Self, ConfigurationError> {
        if input_draw_count == 0 {
            return Err(ConfigurationError::InvalidBranches {
                message: "input_draw_count must be at least 1".to_string(),
            });
        }
        if random_seed_count == 0 {
            return Err(ConfigurationError::InvalidBranches {
                message: "random_seed_count must be at least 1".to_string(),
            });
        }
        Ok(Self {
            input_draw_count,
            random_seed_count,
            templates,
        })
    }

    pub fn input_draw_count(&self) -> u32 {
        self.input_draw_count
    }

    pub fn random_seed_count(&self) -> u32 {
        self.random_seed_count
    }

    pub fn templates(&self) -> &[ConfigurationTree] {
        &self.templates
    }
}
