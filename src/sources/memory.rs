//! Memory source - modules built in code.

use std::collections::HashMap;

use crate::core::{DescriptorError, DescriptorResult, Module, ModuleProvider};

/// A provider handing out clones of pre-built module descriptors.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    name: String,
    modules: HashMap<String, Module>,
    fetches: HashMap<String, usize>,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new(name: impl Into<String>) -> Self {
        MemoryProvider {
            name: name.into(),
            modules: HashMap::new(),
            fetches: HashMap::new(),
        }
    }

    /// Add a module, replacing any module with the same name.
    pub fn add(&mut self, module: Module) {
        self.modules.insert(module.name().to_string(), module);
    }

    /// Builder form of [`MemoryProvider::add`].
    pub fn with_module(mut self, module: Module) -> Self {
        self.add(module);
        self
    }

    /// How many times `name` has been fetched.
    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches.get(name).copied().unwrap_or(0)
    }
}

impl ModuleProvider for MemoryProvider {
    fn fetch_module(&mut self, name: &str) -> DescriptorResult<Module> {
        *self.fetches.entry(name.to_string()).or_default() += 1;

        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| DescriptorError::UnknownModule {
                name: name.to_string(),
                source_name: self.name.clone(),
            })
    }

    fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
