//! `modgraph tree` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::TreeArgs;
use modgraph::ops::{render_tree, TreeOptions};
use modgraph::GlobalContext;

pub fn execute(args: TreeArgs, ctx: &GlobalContext, manifest: Option<PathBuf>) -> Result<()> {
    let registry = super::registry(ctx, manifest)?;

    let opts = TreeOptions {
        depth: args.depth,
        artifacts: args.artifacts,
    };
    print!("{}", render_tree(&registry, opts));

    Ok(())
}
