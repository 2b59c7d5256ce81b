//! ModuleProvider trait - where dependency descriptors come from.
//!
//! The registry builder never constructs upstream modules itself; it asks a
//! provider for each dependency by name. Tests pass in-memory fakes, the
//! CLI passes a manifest-backed provider.

use crate::core::error::{DescriptorError, DescriptorResult};
use crate::core::Module;

/// A source of module descriptors.
pub trait ModuleProvider {
    /// Fetch the descriptor of the module called `name`.
    ///
    /// Fails with `UnknownModule` when this provider has no such module.
    fn fetch_module(&mut self, name: &str) -> DescriptorResult<Module>;

    /// Check if this provider knows a module with the given name.
    fn contains(&self, name: &str) -> bool;

    /// Get the provider name for display.
    fn source_name(&self) -> &str;
}

/// Providers tried in order; the first that knows a name answers.
pub struct ProviderSet {
    providers: Vec<Box<dyn ModuleProvider>>,
}

impl ProviderSet {
    /// Create a new empty provider set.
    pub fn new() -> Self {
        ProviderSet {
            providers: Vec::new(),
        }
    }

    /// Add a provider to the set.
    pub fn add(&mut self, provider: Box<dyn ModuleProvider>) {
        self.providers.push(provider);
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleProvider for ProviderSet {
    fn fetch_module(&mut self, name: &str) -> DescriptorResult<Module> {
        for provider in &mut self.providers {
            if provider.contains(name) {
                tracing::debug!("fetching {} from {}", name, provider.source_name());
                return provider.fetch_module(name);
            }
        }

        Err(DescriptorError::UnknownModule {
            name: name.to_string(),
            source_name: self.source_name().to_string(),
        })
    }

    fn contains(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p.contains(name))
    }

    fn source_name(&self) -> &str {
        "provider set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MemoryProvider;

    #[test]
    fn test_provider_set_first_match_wins() {
        let first = MemoryProvider::new("first")
            .with_module(Module::new("core", "first/core").unwrap());
        let second = MemoryProvider::new("second")
            .with_module(Module::new("core", "second/core").unwrap())
            .with_module(Module::new("unittest", "second/unittest").unwrap());

        let mut set = ProviderSet::new();
        set.add(Box::new(first));
        set.add(Box::new(second));

        assert_eq!(set.fetch_module("core").unwrap().root_path(), "first/core");
        assert_eq!(
            set.fetch_module("unittest").unwrap().root_path(),
            "second/unittest"
        );
        assert!(matches!(
            set.fetch_module("missing"),
            Err(DescriptorError::UnknownModule { .. })
        ));
    }
}
