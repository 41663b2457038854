//! `imgui-ffigen check` command
//!
//! Exits with an error when the generated file is missing or differs from
//! what `generate` would write.

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use imgui_ffigen::ops::{self, CheckStatus};
use imgui_ffigen::util::diagnostic::{self, suggestions, Diagnostic};

pub fn execute(config_path: &Path, args: GenerateArgs, color: bool) -> Result<()> {
    let config = super::load_generate_config(config_path, args)?;

    let report = match ops::check(&config)? {
        CheckStatus::UpToDate(path) => {
            println!("{} is up to date", path.display());
            return Ok(());
        }
        CheckStatus::Stale { path, line } => {
            Diagnostic::warning(format!("{} is out of date", path.display()))
                .with_location(&path)
                .with_context(format!("first difference at line {}", line))
        }
        CheckStatus::Missing(path) => {
            Diagnostic::warning(format!("{} does not exist", path.display()))
        }
    };

    diagnostic::emit(&report.with_suggestion(suggestions::STALE_OUTPUT), color);
    std::process::exit(1);
}
