//! Modgraph.toml manifest parsing and schema.
//!
//! A manifest names the root module and declares every module it can
//! reach: where its sources live, which test artifacts it has, and which
//! modules it depends on.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Modgraph.toml";

/// Parsed Modgraph.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Name of the module being built
    pub root: String,

    /// Declared modules, keyed by name
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleSpec>,
}

/// One `[modules.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModuleSpec {
    /// Source location; derived from `[repository]` config when absent
    pub path: Option<String>,

    pub test_library: bool,

    pub test_executable: bool,

    /// Marks a unit-test framework provider
    pub test_framework: bool,

    /// Module names, in link order
    pub dependencies: Vec<String>,
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("invalid manifest: {}", path.display()))
    }

    /// Parse manifest content.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(content).with_context(|| format!("failed to parse {}", MANIFEST_NAME))?;

        if !manifest.modules.contains_key(&manifest.root) {
            bail!(
                "root module `{}` is not declared under [modules.{}]",
                manifest.root,
                manifest.root
            );
        }

        Ok(manifest)
    }

    /// Get a module declaration by name.
    pub fn module(&self, name: &str) -> Option<&ModuleSpec> {
        self.modules.get(name)
    }
}

/// Find Modgraph.toml in `start` or any parent directory.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
}
