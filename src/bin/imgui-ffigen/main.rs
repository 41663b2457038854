//! imgui-ffigen CLI - Ruby FFI bindings for Dear ImGui

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use imgui_ffigen::util::diagnostic;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        report(&e, color);
        std::process::exit(1);
    }
}

/// Print a failure. Library errors become diagnostics, with any context
/// added on the way up listed as context lines.
fn report(e: &anyhow::Error, color: bool) {
    match e.downcast_ref::<imgui_ffigen::Error>() {
        Some(err) => {
            let diag = e
                .chain()
                .take_while(|cause| !cause.is::<imgui_ffigen::Error>())
                .fold(err.to_diagnostic(), |diag, cause| {
                    diag.with_context(cause.to_string())
                });
            diagnostic::emit(&diag, color);
        }
        None => eprintln!("error: {:#}", e),
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("imgui_ffigen=debug")
    } else {
        EnvFilter::new("imgui_ffigen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(&cli.config, args),
        Commands::Check(args) => commands::check::execute(&cli.config, args, color),
        Commands::Inspect(args) => commands::inspect::execute(&cli.config, args),
        Commands::Init(args) => commands::init::execute(&cli.config, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
