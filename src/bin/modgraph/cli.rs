//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use modgraph::ArtifactKind;

/// modgraph - build-package descriptors for C++ modules
#[derive(Parser)]
#[command(name = "modgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Modgraph.toml (defaults to searching upward from cwd)
    #[arg(long, global = true, env = "MODGRAPH_MANIFEST")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the package registry as a JSON descriptor document
    Generate(GenerateArgs),

    /// Display the module dependency tree
    Tree(TreeArgs),

    /// Show the static link order of an artifact
    Linkplan(LinkplanArgs),

    /// Print the registry fingerprint
    Fingerprint,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON regardless of config
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// List each module's artifacts
    #[arg(long)]
    pub artifacts: bool,
}

#[derive(Args)]
pub struct LinkplanArgs {
    /// Module to show the link plan for
    pub module: String,

    /// Which artifact of the module
    #[arg(long, value_enum, default_value_t = ArtifactArg::Test)]
    pub artifact: ArtifactArg,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Artifact selector on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArtifactArg {
    Main,
    TestLib,
    Test,
}

impl From<ArtifactArg> for ArtifactKind {
    fn from(arg: ArtifactArg) -> Self {
        match arg {
            ArtifactArg::Main => ArtifactKind::MainLibrary,
            ArtifactArg::TestLib => ArtifactKind::TestLibrary,
            ArtifactArg::Test => ArtifactKind::TestExecutable,
        }
    }
}
