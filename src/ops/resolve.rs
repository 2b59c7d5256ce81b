//! Registry construction from a manifest.

use std::path::Path;

use anyhow::{Context, Result};

use crate::resolver::PackageRegistry;
use crate::sources::ManifestProvider;
use crate::util::GlobalContext;

/// Build the package registry for the manifest at `manifest_path`.
///
/// The root module is declared first; every module it reaches is then
/// fetched from the same manifest and resolved.
pub fn load_registry(manifest_path: &Path, ctx: &GlobalContext) -> Result<PackageRegistry> {
    let mut provider = ManifestProvider::load(manifest_path, ctx.config().repository.clone())?;

    let root = provider
        .root_module()
        .with_context(|| format!("failed to declare modules from {}", manifest_path.display()))?;

    let registry = PackageRegistry::build(root, &mut provider)
        .with_context(|| format!("failed to build registry for `{}`", provider.manifest().root))?;

    tracing::info!(
        "Resolved {} ({} modules)",
        registry.root().name(),
        registry.len()
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DescriptorError, MANIFEST_NAME};
    use crate::util::Config;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join(MANIFEST_NAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_registry() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(
            tmp.path(),
            "root = \"app\"\n[modules.app]\ndependencies = [\"core\"]\n[modules.core]\n",
        );
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_config(Config::default());

        let registry = load_registry(&path, &ctx).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.module("core").unwrap().root_path(), "github.com/core");
    }

    #[test]
    fn test_descriptor_error_survives_context() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(
            tmp.path(),
            "root = \"a\"\n[modules.a]\ndependencies = [\"b\"]\n[modules.b]\ndependencies = [\"a\"]\n",
        );
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        let err = load_registry(&path, &ctx).unwrap_err();
        let descriptor = err.downcast_ref::<DescriptorError>().unwrap();
        assert!(matches!(descriptor, DescriptorError::CyclicDependency { .. }));
    }
}
