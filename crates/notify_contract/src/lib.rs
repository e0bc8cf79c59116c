//! Wire contract for desktop-notify payloads embedded in notebook cell output.
//!
//! Kernels publish a [`NotificationRecord`] under [`MIME_TYPE`] in an output's mime bundle and
//! the renderer reads it back. The only field the renderer ever writes is [`PROCESSED_KEY`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod record;

use serde_json::{Map, Value};
use thiserror::Error;

pub use record::{NotificationKind, NotificationRecord};

/// Media type the renderer is registered for.
pub const MIME_TYPE: &str = "application/desktop-notify+json";

/// Wire key of the processed flag inside a record.
pub const PROCESSED_KEY: &str = "isProcessed";

/// Mime bundle of one output: media type to JSON value.
pub type MimeBundle = Map<String, Value>;

/// Errors raised while reading or updating a record inside a mime bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The bundle has no value under the expected media type.
    #[error("no `{mime_type}` data in output")]
    MissingMimeData {
        /// Media type that was looked up.
        mime_type: String,
    },

    /// The value exists but does not have the record shape.
    #[error("malformed `{mime_type}` record: {reason}")]
    MalformedRecord {
        /// Media type the value was stored under.
        mime_type: String,
        /// Human-readable shape mismatch.
        reason: String,
    },
}

impl ContractError {
    fn malformed(mime_type: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            mime_type: mime_type.to_string(),
            reason: reason.into(),
        }
    }
}

/// Decodes and validates the record stored under `mime_type`.
///
/// # Errors
///
/// Returns [`ContractError::MissingMimeData`] when the key is absent and
/// [`ContractError::MalformedRecord`] when the value has the wrong shape, including `NOTIFY`
/// records without a string title.
pub fn decode_record(
    bundle: &MimeBundle,
    mime_type: &str,
) -> Result<NotificationRecord, ContractError> {
    let value = bundle
        .get(mime_type)
        .ok_or_else(|| ContractError::MissingMimeData {
            mime_type: mime_type.to_string(),
        })?;
    if !value.is_object() {
        return Err(ContractError::malformed(mime_type, "expected a JSON object"));
    }
    let record = NotificationRecord::deserialize_value(value)
        .map_err(|err| ContractError::malformed(mime_type, err.to_string()))?;
    if record.kind == NotificationKind::Notify && record.title().is_none() {
        return Err(ContractError::malformed(
            mime_type,
            "NOTIFY payload needs a string `title`",
        ));
    }
    Ok(record)
}

/// Returns whether the value under `mime_type` carries `isProcessed: true`.
///
/// Only the flag is inspected, so a processed record is recognised even when the rest of it
/// would fail [`decode_record`].
pub fn is_processed(bundle: &MimeBundle, mime_type: &str) -> bool {
    bundle
        .get(mime_type)
        .and_then(|value| value.get(PROCESSED_KEY))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Sets the processed flag on the record under `mime_type`, leaving every other field as is.
///
/// Callers apply this to a copy of the live bundle, never to the bundle a host is rendering.
///
/// # Errors
///
/// Returns [`ContractError::MissingMimeData`] or [`ContractError::MalformedRecord`] when the
/// value is absent or not a JSON object.
pub fn mark_processed(bundle: &mut MimeBundle, mime_type: &str) -> Result<(), ContractError> {
    let value = bundle
        .get_mut(mime_type)
        .ok_or_else(|| ContractError::MissingMimeData {
            mime_type: mime_type.to_string(),
        })?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| ContractError::malformed(mime_type, "expected a JSON object"))?;
    object.insert(PROCESSED_KEY.to_string(), Value::Bool(true));
    Ok(())
}
