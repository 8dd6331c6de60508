//! Settings type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimSpecResult;

use super::loader::{self, SettingsWarning};

/// Component namespaces the model-spec loader accepts
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NamespacesSettings {
    /// Empty means any namespace is accepted
    #[serde(default)]
    pub known: Vec<String>,
}

/// Component catalog location
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Framework defaults used as the lowest configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaseSettings {
    /// YAML file replacing the built-in base configuration
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Parse a level name, falling back to `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }

    /// Equivalent `-v` count, so settings and flags combine.
    pub fn as_count(self) -> u8 {
        match self {
            Verbosity::Quiet | Verbosity::Normal => 0,
            Verbosity::Verbose => 1,
            Verbosity::Debug => 2,
        }
    }
}

/// Tool settings (`.simspec/config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub namespaces: NamespacesSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub base: BaseSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> SimSpecResult<Self> {
        let (settings, _warnings) = loader::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load settings and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SimSpecResult<(Self, Vec<SettingsWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit path, project settings, user settings, or defaults
    pub fn load_or_default(explicit: Option<&Path>, project_root: Option<&Path>) -> SimSpecResult<Self> {
        loader::load_or_default(explicit, project_root)
    }

    /// Apply environment variable overrides (SIMSPEC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
