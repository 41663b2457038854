//! Staleness check for a previously generated binding file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::generate::render_to_vec;
use crate::util::config::Config;
use crate::util::fs;

/// State of the generated file relative to the current metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The file matches what `generate` would write.
    UpToDate(PathBuf),
    /// The file differs; `line` is the first differing line (1-based).
    Stale { path: PathBuf, line: usize },
    /// No file exists at the output path.
    Missing(PathBuf),
}

impl CheckStatus {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, CheckStatus::UpToDate(_))
    }
}

/// Render the bindings in memory and compare them with the file on disk.
pub fn check(config: &Config) -> Result<CheckStatus> {
    let path = config.output.path.clone();
    let expected = render_to_vec(config)?;

    let Some(actual) = fs::read_if_exists(&path)
        .with_context(|| format!("failed to read generated file: {}", path.display()))?
    else {
        return Ok(CheckStatus::Missing(path));
    };

    if actual == expected {
        return Ok(CheckStatus::UpToDate(path));
    }

    let line = first_difference(&actual, &expected);
    tracing::debug!("{} differs from fresh output at line {}", path.display(), line);
    Ok(CheckStatus::Stale { path, line })
}

fn first_difference(actual: &[u8], expected: &[u8]) -> usize {
    let mut actual_lines = actual.split(|b| *b == b'\n');
    let mut expected_lines = expected.split(|b| *b == b'\n');
    let mut line = 1;
    loop {
        match (actual_lines.next(), expected_lines.next()) {
            (Some(a), Some(e)) if a == e => line += 1,
            _ => return line,
        }
    }
}
