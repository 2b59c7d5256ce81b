//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.modgraph/config.toml` - User-wide defaults
//! - Project: `.modgraph/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Modgraph configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where module sources live by default
    pub repository: RepositoryConfig,

    /// Descriptor output settings
    pub generator: GeneratorConfig,
}

/// Repository layout used to derive a module's root path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository host (e.g., github.com)
    pub host: String,

    /// Account or organisation on the host
    pub owner: Option<String>,

    /// Separator placed between path components
    pub separator: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            host: "github.com".to_string(),
            owner: None,
            separator: "/".to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Default root path of the module called `name`: `host/owner/name`.
    pub fn root_path_for(&self, name: &str) -> String {
        let mut parts = vec![self.host.as_str()];
        if let Some(owner) = self.owner.as_deref().filter(|o| !o.is_empty()) {
            parts.push(owner);
        }
        parts.push(name);
        parts.join(&self.separator)
    }
}

/// Descriptor output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Pretty-print JSON descriptors
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig { pretty: true }
    }
}

/// Config file with every field optional, used for layering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartialConfig {
    repository: PartialRepository,
    generator: PartialGenerator,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartialRepository {
    host: Option<String>,
    owner: Option<String>,
    separator: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartialGenerator {
    pretty: Option<bool>,
}

impl Config {
    /// Merge file values into this config (the file takes precedence).
    fn merge(&mut self, other: PartialConfig) {
        if let Some(host) = other.repository.host {
            self.repository.host = host;
        }
        if other.repository.owner.is_some() {
            self.repository.owner = other.repository.owner;
        }
        if let Some(separator) = other.repository.separator {
            self.repository.separator = separator;
        }
        if let Some(pretty) = other.generator.pretty {
            self.generator.pretty = pretty;
        }
    }
}

fn load_partial(path: &Path) -> Result<PartialConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.modgraph/config.toml)
/// 2. Global config (~/.modgraph/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    for path in global_path.into_iter().chain([project_path]) {
        if !path.exists() {
            continue;
        }
        match load_partial(path) {
            Ok(partial) => config.merge(partial),
            Err(e) => tracing::warn!("Ignoring config {}: {:#}", path.display(), e),
        }
    }

    config
}

/// Get the global modgraph config directory (~/.modgraph).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".modgraph"))
}

/// Get the global config path (~/.modgraph/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.modgraph/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".modgraph").join("config.toml")
}
