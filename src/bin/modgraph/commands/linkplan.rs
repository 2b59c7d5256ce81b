//! `modgraph linkplan` command

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::cli::LinkplanArgs;
use modgraph::util::diagnostic::suggestions;
use modgraph::{ArtifactKind, GlobalContext};

pub fn execute(args: LinkplanArgs, ctx: &GlobalContext, manifest: Option<PathBuf>) -> Result<()> {
    let registry = super::registry(ctx, manifest)?;

    let module = registry.module(&args.module).ok_or_else(|| {
        anyhow!(
            "module `{}` is not in the registry\n{}",
            args.module,
            suggestions::NOT_IN_REGISTRY
        )
    })?;

    let kind = ArtifactKind::from(args.artifact);
    let artifact = module
        .artifact(kind)
        .ok_or_else(|| anyhow!("module `{}` has no {}", module.name(), kind))?;

    let order = registry.link_order(artifact.id()).unwrap_or_default();

    println!("Link order for '{}':", artifact.name());
    println!();

    if order.is_empty() {
        println!("  (no dependencies)");
    }
    for (i, dep) in order.iter().enumerate() {
        println!(
            "  {}. {}",
            i + 1,
            dep.output_filename(std::env::consts::OS)
        );
        println!("     From: {} ({})", dep.id().module, dep.kind());
    }

    Ok(())
}
