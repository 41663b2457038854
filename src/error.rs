//! Error types for metadata loading, type resolution and output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Result alias for library operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while generating bindings.
///
/// Every variant is terminal: generation stops at the first error and no
/// output file is produced.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read metadata: {}", path.display())]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed metadata in {}: {message}", path.display())]
    MetadataParse { path: PathBuf, message: String },

    #[error("unknown type `{ty}` in {context}")]
    UnknownType { ty: String, context: String },

    #[error("failed to write output: {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::MetadataParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::ReadMetadata { path, source } => {
                Diagnostic::error(format!("could not read metadata file: {}", source))
                    .with_location(path)
                    .with_suggestion(suggestions::CIMGUI_OUTPUT)
            }
            Error::MetadataParse { path, message } => Diagnostic::error(message.clone())
                .with_location(path)
                .with_suggestion(suggestions::CIMGUI_OUTPUT),
            Error::UnknownType { ty, context } => {
                Diagnostic::error(format!("no binding rule for type `{}`", ty))
                    .with_context(format!("used by {}", context))
                    .with_suggestion(suggestions::ADD_TYPEDEF)
                    .with_suggestion(suggestions::ALLOW_UNKNOWN)
            }
            Error::OutputWrite { path, source } => {
                Diagnostic::error(format!("could not write bindings: {}", source))
                    .with_location(path)
            }
        }
    }
}
