//! `modgraph fingerprint` command

use std::path::PathBuf;

use anyhow::Result;

use modgraph::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest: Option<PathBuf>) -> Result<()> {
    let registry = super::registry(ctx, manifest)?;
    println!("{}", registry.fingerprint());
    Ok(())
}
