//! `modgraph generate` command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use modgraph::generator::{generate, JsonGenerator};
use modgraph::GlobalContext;

pub fn execute(args: GenerateArgs, ctx: &GlobalContext, manifest: Option<PathBuf>) -> Result<()> {
    let registry = super::registry(ctx, manifest)?;
    let pretty = ctx.config().generator.pretty && !args.compact;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file: {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut generator = JsonGenerator::new(writer).pretty(pretty);
    generate(&registry, &mut generator)?;
    generator
        .into_inner()
        .flush()
        .context("failed to flush descriptor output")?;

    if let Some(path) = &args.output {
        tracing::info!("Wrote {} modules to {}", registry.len(), path.display());
    }
    Ok(())
}
