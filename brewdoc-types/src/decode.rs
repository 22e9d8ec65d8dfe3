//! Boundary decoding with field-path aware errors.

use crate::batch::BatchSummary;
use crate::error::{RecordError, join_path};
use serde::de::DeserializeOwned;

/// Decodes `json` into `T`, reporting failures with the path of the offending field.
pub fn decode_json<T: DeserializeOwned>(json: &str) -> Result<T, RecordError> {
    let mut de = serde_json::Deserializer::from_str(json);
    let value = serde_path_to_error::deserialize(&mut de).map_err(classify)?;
    de.end().map_err(|e| RecordError::Json {
        message: e.to_string(),
    })?;
    Ok(value)
}

/// Decodes an already parsed JSON value into `T`.
pub fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, RecordError> {
    serde_path_to_error::deserialize(value).map_err(classify)
}

/// Decodes the response of the batch listing endpoint.
pub fn decode_batch_list(json: &str) -> Result<Vec<BatchSummary>, RecordError> {
    decode_json(json)
}

fn classify(err: serde_path_to_error::Error<serde_json::Error>) -> RecordError {
    let path = err.path().to_string();
    let inner = err.into_inner();
    if inner.is_syntax() || inner.is_eof() || inner.is_io() {
        return RecordError::Json {
            message: inner.to_string(),
        };
    }

    let message = inner.to_string();
    let message = strip_position(&message);
    match missing_field_name(message) {
        Some(field) => RecordError::MissingField {
            path: join_path(&path, field),
        },
        None => RecordError::Invalid {
            path,
            message: message.to_string(),
        },
    }
}

fn missing_field_name(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

/// serde_json appends " at line L column C" when it knows the position.
fn strip_position(message: &str) -> &str {
    message
        .rsplit_once(" at line ")
        .map(|(head, _)| head)
        .unwrap_or(message)
}
