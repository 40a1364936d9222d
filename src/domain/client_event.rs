use serde::Serialize;
use serde_json::value::RawValue;

/// Fixed message carried by every `completed` event.
pub const COMPLETED_MESSAGE: &str = "Medical summary generation completed";

/// The unit delivered to a summary subscriber.
///
/// Serializes as `{"event": "message" | "completed" | "error", ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ClientEvent {
    Message { content: MessageContent },
    Completed { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    /// Pre-formatted JSON, embedded as-is.
    Structured(Box<RawValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Message,
    Completed,
    Error,
}

impl ClientEvent {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Message {
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn completed() -> Self {
        Self::Completed {
            message: COMPLETED_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message { .. } => EventKind::Message,
            Self::Completed { .. } => EventKind::Completed,
            Self::Error { .. } => EventKind::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Message { .. })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The event framed as one `text/event-stream` record.
    pub fn to_sse_frame(&self) -> String {
        format!("data: {}\n\n", self.to_json())
    }
}
