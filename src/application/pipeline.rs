//! Model specification pipeline
//!
//! Turns a model specification into everything an engine needs to start a
//! run. Used by every CLI command.
//!
//! ## Flow
//!
//! 1. Parse the model specification (namespaces checked against settings)
//! 2. Instantiate each component reference through the registry
//! 3. Resolve configuration: base, component defaults, the specification's
//!    `configuration` section, then overrides

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{base_configuration, Settings};
use crate::domain::entities::{BranchSet, ConfigurationTree, ModelSpecification};
use crate::domain::ports::Component;
use crate::domain::services::{
    expand_branches, ComponentRegistry, ConfigurationResolver, ResolvedConfiguration, BASE_LAYER,
    COMPONENT_LAYER, MODEL_LAYER, OVERRIDE_LAYER,
};
use crate::error::SimSpecResult;
use crate::infrastructure::load_catalog;
use crate::parser::ModelSpecLoader;

/// A model specification ready to hand to an engine.
#[derive(Debug)]
pub struct PreparedRun {
    pub specification: ModelSpecification,
    pub components: Vec<Box<dyn Component>>,
    pub configuration: ResolvedConfiguration,
}

impl PreparedRun {
    pub fn component_names(&self) -> Vec<String> {
        self.components.iter().map(|c| c.name()).collect()
    }
}

/// Parse, instantiate and resolve in one place.
///
/// Without a registry no components are instantiated, the component layer
/// stays empty and unknown-key warnings are disabled (every component key
/// would look unknown).
#[derive(Debug, Default)]
pub struct SpecPipeline {
    loader: ModelSpecLoader,
    registry: Option<ComponentRegistry>,
    base: Option<(String, ConfigurationTree)>,
    overrides: Vec<(String, ConfigurationTree)>,
}

impl SpecPipeline {
    pub fn new(loader: ModelSpecLoader) -> Self {
        Self {
            loader,
            ..Self::default()
        }
    }

    /// Pipeline configured from settings: known namespaces, catalog and base.
    pub fn from_settings(settings: &Settings) -> SimSpecResult<Self> {
        let loader = ModelSpecLoader::new().with_known_namespaces(settings.namespaces.known.iter().cloned());
        let (origin, base) = base_configuration(settings)?;
        let mut pipeline = Self::new(loader).with_base(origin, base);

        if let Some(path) = &settings.catalog.path {
            debug!(catalog = %path.display(), "loading component catalog");
            pipeline = pipeline.with_registry(load_catalog(path)?);
        }

        Ok(pipeline)
    }

    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_base(mut self, origin: impl Into<String>, base: ConfigurationTree) -> Self {
        self.base = Some((origin.into(), base));
        self
    }

    /// Queue an override tree. Overrides apply in the order they are added.
    pub fn with_override(mut self, origin: impl Into<String>, tree: ConfigurationTree) -> Self {
        self.overrides.push((origin.into(), tree));
        self
    }

    pub fn loader(&self) -> &ModelSpecLoader {
        &self.loader
    }

    pub fn registry(&self) -> Option<&ComponentRegistry> {
        self.registry.as_ref()
    }

    pub fn load(&self, path: &Path) -> SimSpecResult<ModelSpecification> {
        self.loader.load_file(path)
    }

    pub fn prepare_file(&self, path: &Path) -> SimSpecResult<PreparedRun> {
        let specification = self.load(path)?;
        self.prepare(specification, &path.display().to_string())
    }

    /// Instantiate components and resolve configuration for a parsed specification.
    pub fn prepare(&self, specification: ModelSpecification, origin: &str) -> SimSpecResult<PreparedRun> {
        let components = self.instantiate(&specification)?;
        let configuration = self.resolve(&specification, origin, &components, &[])?;

        info!(
            origin,
            components = components.len(),
            leaves = configuration.sources.len(),
            overrides = configuration.overrides.len(),
            "prepared model specification"
        );

        Ok(PreparedRun {
            specification,
            components,
            configuration,
        })
    }

    /// Resolve one configuration per expanded branch, instantiating once.
    pub fn resolve_branches(
        &self,
        specification: &ModelSpecification,
        origin: &str,
        branches: &BranchSet,
    ) -> SimSpecResult<Vec<ResolvedConfiguration>> {
        let components = self.instantiate(specification)?;
        let runs = expand_branches(branches)?;

        let mut resolved = Vec::with_capacity(runs.len());
        for (index, run) in runs.into_iter().enumerate() {
            let label = format!("branch {}", index);
            resolved.push(self.resolve(specification, origin, &components, &[(label, run)])?);
        }

        info!(origin, runs = resolved.len(), "resolved branch configurations");
        Ok(resolved)
    }

    fn instantiate(&self, specification: &ModelSpecification) -> SimSpecResult<Vec<Box<dyn Component>>> {
        match &self.registry {
            Some(registry) => Ok(registry.instantiate_all(specification.components())?),
            None => {
                debug!("no component registry, skipping instantiation");
                Ok(Vec::new())
            }
        }
    }

    fn resolve(
        &self,
        specification: &ModelSpecification,
        origin: &str,
        components: &[Box<dyn Component>],
        extra: &[(String, ConfigurationTree)],
    ) -> SimSpecResult<ResolvedConfiguration> {
        let mut resolver = ConfigurationResolver::standard().with_unknown_key_warnings(self.registry.is_some());

        if let Some((base_origin, base)) = &self.base {
            resolver.add(BASE_LAYER, base_origin.clone(), base.clone())?;
        }
        for component in components {
            let defaults = component.configuration_defaults();
            if !defaults.is_empty() {
                resolver.add(COMPONENT_LAYER, component.name(), defaults)?;
            }
        }
        resolver.add(MODEL_LAYER, origin, specification.configuration().clone())?;
        for (override_origin, tree) in self.overrides.iter().chain(extra) {
            resolver.add(OVERRIDE_LAYER, override_origin.clone(), tree.clone())?;
        }

        let resolved = resolver.resolve()?;
        for warning in &resolved.warnings {
            warn!("{}", warning);
        }
        Ok(resolved)
    }
}
