//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use imgui_ffigen::util::config::CONFIG_FILE;

/// imgui-ffigen - Ruby FFI bindings for Dear ImGui from cimgui metadata
#[derive(Parser)]
#[command(name = "imgui-ffigen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file
    #[arg(long, global = true, env = "IMGUI_FFIGEN_CONFIG", default_value = CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the binding file
    Generate(GenerateArgs),

    /// Check that the binding file is up to date
    Check(GenerateArgs),

    /// Show metadata counts before and after filtering
    Inspect(InspectArgs),

    /// Write a configuration file with the default settings
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Metadata input overrides.
#[derive(Args, Clone, Default)]
pub struct InputArgs {
    /// typedefs_dict.json
    #[arg(long)]
    pub typedefs: Option<PathBuf>,

    /// structs_and_enums.json
    #[arg(long)]
    pub structs_and_enums: Option<PathBuf>,

    /// definitions.json
    #[arg(long)]
    pub definitions: Option<PathBuf>,

    /// impl_definitions.json
    #[arg(long, conflicts_with = "no_impl")]
    pub impl_definitions: Option<PathBuf>,

    /// Skip backend implementation functions
    #[arg(long)]
    pub no_impl: bool,

    /// Emit unrecognized type tokens as-is instead of failing
    #[arg(long)]
    pub allow_unknown_types: bool,
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ruby module holding the function bindings
    #[arg(long)]
    pub module_name: Option<String>,

    /// Default shared library path for `load_lib`
    #[arg(long)]
    pub default_lib: Option<String>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
