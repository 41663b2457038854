//! `imgui-ffigen generate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use imgui_ffigen::ops;

pub fn execute(config_path: &Path, args: GenerateArgs) -> Result<()> {
    let config = super::load_generate_config(config_path, args)?;
    let summary = ops::generate(&config)?;

    println!(
        "Generated {} ({} enums, {} structs, {} functions)",
        summary.output.display(),
        summary.enums,
        summary.structs,
        summary.functions
    );

    Ok(())
}
