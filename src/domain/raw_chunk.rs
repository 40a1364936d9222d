/// Literal emitted by sentinel-speaking producers when a summary is done.
pub const COMPLETED_SENTINEL: &str = "[COMPLETED]";
/// Prefix emitted by sentinel-speaking producers before an error message.
pub const ERROR_SENTINEL_PREFIX: &str = "[ERROR]";

/// One unit produced by a summary producer, upstream or fallback.
///
/// Every producer sequence ends with exactly one terminal chunk
/// (`Completed` or `Failed`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChunk {
    Content(String),
    Completed,
    Failed(String),
}

impl RawChunk {
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content(text.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Classifies a chunk from a producer that signals state with in-band
    /// sentinel strings.
    pub fn from_sentinel(raw: &str) -> Self {
        if raw == COMPLETED_SENTINEL {
            Self::Completed
        } else if let Some(message) = raw.strip_prefix(ERROR_SENTINEL_PREFIX) {
            Self::Failed(message.to_string())
        } else {
            Self::Content(raw.to_string())
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }
}
