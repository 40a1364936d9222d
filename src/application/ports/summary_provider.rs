use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::Stream;

use crate::domain::RawChunk;

pub type RawChunkStream =
    Pin<Box<dyn Stream<Item = Result<RawChunk, SummaryProviderError>> + Send + 'static>>;

/// Participants of the visit being summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub source_text: String,
    pub doctor_id: String,
    pub patient_id: String,
}

/// Upstream producer of a streamed medical summary.
///
/// A well-behaved stream ends with exactly one terminal chunk. An `Err` item,
/// a failed call, or a stream that ends early all count as upstream failures.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn stream_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<RawChunkStream, SummaryProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryProviderError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("stream ended without a terminal chunk")]
    Truncated,
    #[error("configuration error: {0}")]
    Configuration(String),
}
