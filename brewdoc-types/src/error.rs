use thiserror::Error;

/// Failure to turn raw JSON into a typed record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required field is absent. `path` is the full field path, e.g. `style.styleLetter`.
    #[error("missing field `{path}`")]
    MissingField { path: String },

    /// A field is present but has the wrong shape.
    #[error("invalid value at `{path}`: {message}")]
    Invalid { path: String, message: String },

    /// The input is not JSON at all.
    #[error("json parse error: {message}")]
    Json { message: String },
}

impl RecordError {
    /// Field path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            RecordError::MissingField { path } | RecordError::Invalid { path, .. } => Some(path),
            RecordError::Json { .. } => None,
        }
    }

    /// Re-roots the error under `prefix`, for records decoded out of a parent document.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            RecordError::MissingField { path } => RecordError::MissingField {
                path: join_path(prefix, &path),
            },
            RecordError::Invalid { path, message } => RecordError::Invalid {
                path: join_path(prefix, &path),
                message,
            },
            other => other,
        }
    }
}

/// Joins two field path fragments. `.` denotes the root.
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    match (parent, child) {
        ("." | "", c) => c.to_string(),
        (p, "." | "") => p.to_string(),
        (p, c) if c.starts_with('[') => format!("{p}{c}"),
        (p, c) => format!("{p}.{c}"),
    }
}
