//! Metadata summary before and after filtering.

use anyhow::Result;
use serde::Serialize;

use super::generate::{load_metadata, prepare};
use crate::util::config::Config;

/// Entity counts as loaded and as bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub typedefs: usize,
    pub enums: usize,
    pub enum_members: usize,
    pub structs_loaded: usize,
    pub structs_bound: usize,
    pub functions_loaded: usize,
    pub functions_bound: usize,
}

pub fn inspect(config: &Config) -> Result<InspectReport> {
    let metadata = load_metadata(config)?;

    let mut report = InspectReport {
        typedefs: metadata.typedefs.len(),
        enums: metadata.enums.len(),
        enum_members: metadata.enums.iter().map(|e| e.members.len()).sum(),
        structs_loaded: metadata.structs.len(),
        functions_loaded: metadata.functions.len() + metadata.impl_functions.len(),
        ..Default::default()
    };

    let bindings = prepare(config, metadata)?;
    report.structs_bound = bindings.structs.len();
    report.functions_bound = bindings.functions.len();

    Ok(report)
}
