//! Error types for brewdoc-source.
//!
//! Input errors (exit code 2) are problems with what the user asked for: no batch for the recipe
//! name, or a record missing a required field. Everything else is a runtime error (exit code 1).

use brewdoc_types::RecordError;
use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// No batch's recipe name equals the searched name.
    #[error("lookup failed: no batch found for recipe {name:?}")]
    LookupFailed { name: String },

    /// A batch id that the source does not know.
    #[error("unknown batch id {id:?}")]
    UnknownBatch { id: String },

    /// A record could not be decoded; `source` carries the field path.
    #[error("{context}")]
    Record {
        context: String,
        #[source]
        source: RecordError,
    },

    #[error("io error at {path}: {message}")]
    Io { path: Utf8PathBuf, message: String },

    /// The request never produced a response.
    #[error("{context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{context}: HTTP {status}")]
    Status {
        context: String,
        status: reqwest::StatusCode,
    },

    #[error("missing Brewfather credentials (set BREWFATHER_USERNAME and BREWFATHER_API_KEY)")]
    MissingCredentials,
}

impl SourceError {
    /// Returns true for errors caused by the input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SourceError::LookupFailed { .. }
                | SourceError::UnknownBatch { .. }
                | SourceError::Record { .. }
        )
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_input_error() { 2 } else { 1 }
    }

    /// The missing or invalid field path, for record errors.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            SourceError::Record { source, .. } => source.path(),
            _ => None,
        }
    }

    pub(crate) fn record(context: impl Into<String>, source: RecordError) -> Self {
        SourceError::Record {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
