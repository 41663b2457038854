//! `imgui-ffigen inspect` command

use std::path::Path;

use anyhow::Result;

use crate::cli::InspectArgs;
use imgui_ffigen::ops;

pub fn execute(config_path: &Path, args: InspectArgs) -> Result<()> {
    let config = super::load_config(config_path, &args.input)?;
    let report = ops::inspect(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("typedefs:   {}", report.typedefs);
    println!(
        "enums:      {} ({} members)",
        report.enums, report.enum_members
    );
    println!(
        "structs:    {} bound of {} loaded",
        report.structs_bound, report.structs_loaded
    );
    println!(
        "functions:  {} bound of {} loaded",
        report.functions_bound, report.functions_loaded
    );

    Ok(())
}
