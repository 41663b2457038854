//! Command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod init;
pub mod inspect;

use std::path::Path;

use anyhow::Result;

use crate::cli::{GenerateArgs, InputArgs};
use imgui_ffigen::Config;

/// Load the config file (if present) and apply command line overrides.
pub fn load_config(path: &Path, input: &InputArgs) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;

    if let Some(ref p) = input.typedefs {
        config.input.typedefs = p.clone();
    }
    if let Some(ref p) = input.structs_and_enums {
        config.input.structs_and_enums = p.clone();
    }
    if let Some(ref p) = input.definitions {
        config.input.definitions = p.clone();
    }
    if input.impl_definitions.is_some() {
        config.input.impl_definitions = input.impl_definitions.clone();
    }
    if input.no_impl {
        config.input.impl_definitions = None;
    }
    if input.allow_unknown_types {
        config.types.allow_unknown = true;
    }

    Ok(config)
}

/// [`load_config`] plus the output overrides of `generate` and `check`.
pub fn load_generate_config(path: &Path, args: GenerateArgs) -> Result<Config> {
    let mut config = load_config(path, &args.input)?;

    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(module_name) = args.module_name {
        config.output.module_name = module_name;
    }
    if let Some(default_lib) = args.default_lib {
        config.output.default_lib = default_lib;
    }

    Ok(config)
}
