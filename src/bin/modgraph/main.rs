//! modgraph CLI - build-package descriptors for C++ modules

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use modgraph::util::diagnostic;
use modgraph::{DescriptorError, GlobalContext};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = match GlobalContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };
    ctx.set_color(!cli.no_color);

    if let Err(e) = run(cli, &ctx) {
        match e.downcast_ref::<DescriptorError>() {
            Some(err) => {
                diagnostic::emit(&err.to_diagnostic(), ctx.color());
                if e.to_string() != err.to_string() {
                    eprintln!("note: {}", e);
                }
            }
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("modgraph=debug")
    } else {
        EnvFilter::new("modgraph=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, ctx: &GlobalContext) -> Result<()> {
    let manifest = cli.manifest_path;

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, ctx, manifest),
        Commands::Tree(args) => commands::tree::execute(args, ctx, manifest),
        Commands::Linkplan(args) => commands::linkplan::execute(args, ctx, manifest),
        Commands::Fingerprint => commands::fingerprint::execute(ctx, manifest),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
