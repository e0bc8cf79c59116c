//! Notification record model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{MimeBundle, MIME_TYPE};

/// What a record asks the renderer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// First-time handshake: probe or request permission, never notify.
    #[serde(rename = "INIT")]
    Init,
    /// Actionable notification to show.
    #[serde(rename = "NOTIFY")]
    Notify,
}

impl NotificationKind {
    /// Wire token for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Notify => "NOTIFY",
        }
    }
}

/// Payload stored under [`MIME_TYPE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Handshake or notification.
    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// Free-form payload. Only `title` is read.
    #[serde(default)]
    pub payload: Map<String, Value>,

    /// Set once the renderer has acted on the record. Absent on the wire means `false`.
    #[serde(rename = "isProcessed", default, skip_serializing_if = "is_false")]
    pub processed: bool,

    /// Identifier used to address inline fallback content.
    pub id: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NotificationRecord {
    /// New permission handshake record with a fresh id.
    pub fn init() -> Self {
        Self::new(NotificationKind::Init, None)
    }

    /// New notification record titled `title` with a fresh id.
    pub fn notify(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Notify, Some(title.into()))
    }

    fn new(kind: NotificationKind, title: Option<String>) -> Self {
        let mut payload = Map::new();
        payload.insert(
            "title".to_string(),
            title.map(Value::String).unwrap_or(Value::Null),
        );
        Self {
            kind,
            payload,
            processed: false,
            id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Notification title, when the payload carries a string one.
    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }

    /// Wraps the record into a mime bundle keyed by [`MIME_TYPE`].
    pub fn into_bundle(self) -> MimeBundle {
        let mut bundle = MimeBundle::new();
        // Serializing a struct of strings, maps, and bools cannot fail.
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        bundle.insert(MIME_TYPE.to_string(), value);
        bundle
    }

    pub(crate) fn deserialize_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}
