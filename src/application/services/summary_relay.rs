use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use tokio::time::timeout;

use crate::application::ports::{
    RawChunkStream, SummaryProvider, SummaryProviderError, SummaryRequest, TranscriptRepository,
};
use crate::domain::{ClientEvent, RawChunk, VisitId};

use super::fallback_generator::{FallbackGenerator, FallbackStream};
use super::stream_translator::translate;

pub type ClientEventStream = Pin<Box<dyn Stream<Item = ClientEvent> + Send + 'static>>;

/// Which visit to summarize, and for whom.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryTarget {
    pub visit_id: VisitId,
    pub doctor_id: String,
    pub patient_id: String,
}

enum RelayStage {
    Upstream(RawChunkStream),
    Fallback(FallbackStream),
    Terminated,
}

enum Pulled {
    Chunk(RawChunk),
    UpstreamFailed(SummaryProviderError),
    Exhausted,
}

/// Drives the upstream summary provider and switches, at most once, to the
/// local fallback generator when the upstream fails.
pub struct SummaryRelay<P>
where
    P: SummaryProvider + ?Sized,
{
    transcript_repository: Arc<dyn TranscriptRepository>,
    provider: Arc<P>,
    fallback: FallbackGenerator,
    upstream_timeout: Duration,
}

impl<P> SummaryRelay<P>
where
    P: SummaryProvider + ?Sized + 'static,
{
    pub fn new(
        transcript_repository: Arc<dyn TranscriptRepository>,
        provider: Arc<P>,
        fallback: FallbackGenerator,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            transcript_repository,
            provider,
            fallback,
            upstream_timeout,
        }
    }

    /// Streams the summary events for `target`. The stream always ends with
    /// exactly one terminal event unless it is dropped first.
    pub fn summarize(&self, target: SummaryTarget) -> ClientEventStream {
        let repository = Arc::clone(&self.transcript_repository);
        let provider = Arc::clone(&self.provider);
        let fallback = self.fallback.clone();
        let upstream_timeout = self.upstream_timeout;

        Box::pin(async_stream::stream! {
            let SummaryTarget { visit_id, doctor_id, patient_id } = target;

            tracing::info!(
                visit_id = %visit_id,
                doctor_id = %doctor_id,
                patient_id = %patient_id,
                "Starting medical summary"
            );

            let transcript = match repository.find(&visit_id).await {
                Ok(Some(transcript)) => transcript,
                Ok(None) => {
                    tracing::warn!(visit_id = %visit_id, "No transcript for visit");
                    yield ClientEvent::error(format!("no transcript found for visit {visit_id}"));
                    return;
                }
                Err(e) => {
                    tracing::error!(visit_id = %visit_id, error = %e, "Transcript lookup failed");
                    yield ClientEvent::error(format!("could not load the transcript for visit {visit_id}"));
                    return;
                }
            };

            let Some(source_text) = transcript.source_text() else {
                tracing::warn!(visit_id = %visit_id, "Transcript text is empty");
                yield ClientEvent::error("transcript text is empty");
                return;
            };

            tracing::debug!(visit_id = %visit_id, text_length = source_text.len(), "Found transcript");

            let request = SummaryRequest {
                source_text: source_text.to_string(),
                doctor_id,
                patient_id,
            };

            let mut stage = match timeout(upstream_timeout, provider.stream_summary(&request)).await {
                Ok(Ok(chunks)) => RelayStage::Upstream(chunks),
                Ok(Err(e)) => {
                    tracing::error!(visit_id = %visit_id, error = %e, "Upstream summary call failed, using fallback");
                    RelayStage::Fallback(fallback.generate(&request.source_text))
                }
                Err(_) => {
                    let e = SummaryProviderError::TimedOut(upstream_timeout);
                    tracing::error!(visit_id = %visit_id, error = %e, "Upstream summary call failed, using fallback");
                    RelayStage::Fallback(fallback.generate(&request.source_text))
                }
            };

            loop {
                let pulled = match &mut stage {
                    RelayStage::Upstream(chunks) => match timeout(upstream_timeout, chunks.next()).await {
                        Ok(Some(Ok(chunk))) => Pulled::Chunk(chunk),
                        Ok(Some(Err(e))) => Pulled::UpstreamFailed(e),
                        Ok(None) => Pulled::UpstreamFailed(SummaryProviderError::Truncated),
                        Err(_) => Pulled::UpstreamFailed(SummaryProviderError::TimedOut(upstream_timeout)),
                    },
                    RelayStage::Fallback(chunks) => match chunks.next().await {
                        Some(chunk) => Pulled::Chunk(chunk),
                        None => Pulled::Exhausted,
                    },
                    RelayStage::Terminated => Pulled::Exhausted,
                };

                match pulled {
                    Pulled::Chunk(chunk) => {
                        let event = translate(&chunk);
                        match &chunk {
                            RawChunk::Completed => {
                                tracing::info!(visit_id = %visit_id, "Medical summary completed");
                            }
                            RawChunk::Failed(message) => {
                                tracing::error!(visit_id = %visit_id, error = %message, "Medical summary failed");
                            }
                            RawChunk::Content(_) => {}
                        }
                        if chunk.is_terminal() {
                            stage = RelayStage::Terminated;
                        }
                        yield event;
                    }
                    Pulled::UpstreamFailed(e) => {
                        tracing::error!(visit_id = %visit_id, error = %e, "Upstream summary stream failed, using fallback");
                        stage = RelayStage::Fallback(fallback.generate(&request.source_text));
                    }
                    Pulled::Exhausted => {
                        if !matches!(stage, RelayStage::Terminated) {
                            tracing::error!(visit_id = %visit_id, "Fallback stream ended without a terminal chunk");
                            yield ClientEvent::error("summary stream ended without a result");
                        }
                        break;
                    }
                }
            }
        })
    }

    /// Runs the same relay as [`summarize`](Self::summarize) and returns only
    /// its terminal event.
    pub async fn summarize_to_completion(&self, target: SummaryTarget) -> ClientEvent {
        let mut events = self.summarize(target);
        let mut last = None;
        while let Some(event) = events.next().await {
            last = Some(event);
        }

        last.unwrap_or_else(|| ClientEvent::error("summary stream ended without a result"))
    }
}
