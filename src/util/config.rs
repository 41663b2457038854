//! Configuration file support.
//!
//! The generator reads an optional `ffigen.toml` from the working directory
//! (or the path given with `--config`). Every section has defaults matching
//! the standard cimgui checkout layout, so an empty or missing file is valid.
//! Command line flags take precedence over file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::filter::{DEFAULT_FUNCTION_PREFIXES, DEFAULT_OMIT_BACKENDS, DEFAULT_OMIT_STRUCTS};
use crate::naming::{default_rules, NameRule};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "ffigen.toml";

const CIMGUI_OUTPUT: &str = "../cimgui/generator/output";

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata locations
    pub input: InputConfig,

    /// Generated file settings
    pub output: OutputConfig,

    /// Entity filtering
    pub filter: FilterConfig,

    /// Function name mapping
    pub naming: NamingConfig,

    /// Type resolution
    pub types: TypesConfig,
}

/// Paths of the cimgui metadata documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub typedefs: PathBuf,
    pub structs_and_enums: PathBuf,
    pub definitions: PathBuf,
    /// Backend implementation definitions (skipped when absent)
    pub impl_definitions: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        let base = Path::new(CIMGUI_OUTPUT);
        InputConfig {
            typedefs: base.join("typedefs_dict.json"),
            structs_and_enums: base.join("structs_and_enums.json"),
            definitions: base.join("definitions.json"),
            impl_definitions: Some(base.join("impl_definitions.json")),
        }
    }
}

/// Generated file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of the generated Ruby file
    pub path: PathBuf,

    /// Ruby module holding the function bindings
    pub module_name: String,

    /// Default shared library for `load_lib`
    pub default_lib: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("../imgui.rb"),
            module_name: "ImGui".to_string(),
            default_lib: "./imgui.dylib".to_string(),
        }
    }
}

/// Entity filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Struct names that are never bound
    pub omit_structs: Vec<String>,

    /// Public API prefixes for definitions.json functions
    pub function_prefixes: Vec<String>,

    /// Backend markers dropped from impl_definitions.json functions
    pub omit_backends: Vec<String>,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            omit_structs: to_strings(DEFAULT_OMIT_STRUCTS),
            function_prefixes: to_strings(DEFAULT_FUNCTION_PREFIXES),
            omit_backends: to_strings(DEFAULT_OMIT_BACKENDS),
        }
    }
}

/// Function name mapping rules, evaluated in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub rules: Vec<NameRule>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        NamingConfig {
            rules: default_rules(),
        }
    }
}

/// Type resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Emit unrecognized type tokens as-is instead of failing
    pub allow_unknown: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))
    }
}
