//! Settings module for simspec
//!
//! Settings hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SIMSPEC_*)
//! 3. Explicit `--config` file, else project settings (.simspec/config.toml)
//! 4. User settings (~/.config/simspec/config.toml)
//! 5. Built-in defaults (lowest priority)

mod defaults;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use defaults::{base_configuration, builtin_base, BASE_CONFIGURATION, BUILTIN_ORIGIN};
pub use loader::{with_overrides_from, SettingsWarning, PROJECT_SETTINGS_PATH, USER_SETTINGS_PATH};
pub use types::{BaseSettings, CatalogSettings, NamespacesSettings, OutputSettings, Settings, Verbosity};
