//! `imgui-ffigen init` command
//!
//! Writes the default configuration so it can be edited.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::InitArgs;
use imgui_ffigen::Config;

pub fn execute(config_path: &Path, args: InitArgs) -> Result<()> {
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists\n\nhelp: pass --force to overwrite it",
            config_path.display()
        );
    }

    Config::default().save(config_path)?;
    println!("Created {}", config_path.display());

    Ok(())
}
