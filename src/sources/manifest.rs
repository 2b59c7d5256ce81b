//! Manifest source - modules declared in Modgraph.toml.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::core::{
    DescriptorError, DescriptorResult, Manifest, Module, ModuleProvider, ModuleSpec, MANIFEST_NAME,
};
use crate::util::config::RepositoryConfig;

/// A provider building module descriptors from manifest declarations.
///
/// Each module is built once: its declared dependencies are built first
/// (recursively, the same way) and attached with `depend_on`, so cycles in
/// the manifest are rejected while descriptors are being constructed.
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    manifest: Manifest,
    repository: RepositoryConfig,
    source_name: String,
    built: HashMap<String, Module>,
}

impl ManifestProvider {
    /// Create a provider for an already parsed manifest.
    pub fn new(manifest: Manifest, repository: RepositoryConfig) -> Self {
        ManifestProvider {
            manifest,
            repository,
            source_name: MANIFEST_NAME.to_string(),
            built: HashMap::new(),
        }
    }

    /// Load the manifest at `path`.
    pub fn load(path: &Path, repository: RepositoryConfig) -> Result<Self> {
        let manifest = Manifest::load(path)?;
        let mut provider = Self::new(manifest, repository);
        provider.source_name = path.display().to_string();
        Ok(provider)
    }

    /// The manifest this provider reads.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Build the manifest's root module.
    pub fn root_module(&mut self) -> DescriptorResult<Module> {
        let root = self.manifest.root.clone();
        self.fetch_module(&root)
    }

    fn materialize(&mut self, name: &str, stack: &mut Vec<String>) -> DescriptorResult<Module> {
        if let Some(module) = self.built.get(name) {
            return Ok(module.clone());
        }
        if let Some(pos) = stack.iter().position(|n| n == name) {
            let mut path = stack[pos..].to_vec();
            path.push(name.to_string());
            return Err(DescriptorError::CyclicDependency { path });
        }

        let spec = self
            .manifest
            .module(name)
            .cloned()
            .ok_or_else(|| DescriptorError::UnknownModule {
                name: name.to_string(),
                source_name: self.source_name.clone(),
            })?;

        let mut module = self.declare(name, &spec)?;

        stack.push(name.to_string());
        for dep in &spec.dependencies {
            let upstream = self.materialize(dep, stack)?;
            module.depend_on(&upstream)?;
        }
        stack.pop();

        tracing::debug!("declared {} from {}", name, self.source_name);
        self.built.insert(name.to_string(), module.clone());
        Ok(module)
    }

    /// Apply one `[modules.<name>]` table to a fresh module.
    fn declare(&self, name: &str, spec: &ModuleSpec) -> DescriptorResult<Module> {
        let path = spec
            .path
            .clone()
            .unwrap_or_else(|| self.repository.root_path_for(name));

        let mut module = Module::new(name, path)?;
        if spec.test_library {
            module = module.with_test_library();
        }
        if spec.test_executable {
            module = module.with_test_executable();
        }
        if spec.test_framework {
            module = module.as_test_framework();
        }
        Ok(module)
    }
}

impl ModuleProvider for ManifestProvider {
    fn fetch_module(&mut self, name: &str) -> DescriptorResult<Module> {
        self.materialize(name, &mut Vec::new())
    }

    fn contains(&self, name: &str) -> bool {
        self.manifest.modules.contains_key(name)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}
