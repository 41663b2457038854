//! High-level operations behind the CLI commands.

pub mod check;
pub mod generate;
pub mod inspect;

pub use check::{check, CheckStatus};
pub use generate::{generate, render_to_vec, GenerateSummary};
pub use inspect::{inspect, InspectReport};
