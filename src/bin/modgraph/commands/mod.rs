//! Command implementations

pub mod completions;
pub mod fingerprint;
pub mod generate;
pub mod linkplan;
pub mod tree;

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use modgraph::ops::load_registry;
use modgraph::util::diagnostic::suggestions;
use modgraph::{GlobalContext, PackageRegistry};

/// Locate the manifest and build its registry.
pub fn registry(ctx: &GlobalContext, manifest: Option<PathBuf>) -> Result<PackageRegistry> {
    let manifest_path = match manifest {
        Some(path) => path,
        None => ctx.find_manifest().ok_or_else(|| {
            anyhow!(
                "could not find Modgraph.toml in {} or any parent directory\n{}",
                ctx.cwd().display(),
                suggestions::NO_MANIFEST
            )
        })?,
    };

    load_registry(&manifest_path, ctx)
}
