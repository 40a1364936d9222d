use std::pin::Pin;
use std::time::Duration;

use futures::stream::Stream;

use crate::domain::RawChunk;

pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

pub const INTRO_MESSAGE: &str = "Generating the medical summary with the fallback method...";

pub const DEFAULT_TEMPLATE: &str = "Medical Summary\n\
==========\n\
Chief complaint: derived from the visit recording\n\
Original record: {transcript}\n\
\n\
Recommendation: further examination and a detailed consultation";

pub type FallbackStream = Pin<Box<dyn Stream<Item = RawChunk> + Send + 'static>>;

/// Simulated latency between the lines of a fallback summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPacing {
    pub intro_delay: Duration,
    pub line_interval: Duration,
}

impl FallbackPacing {
    pub fn immediate() -> Self {
        Self {
            intro_delay: Duration::ZERO,
            line_interval: Duration::ZERO,
        }
    }
}

impl Default for FallbackPacing {
    fn default() -> Self {
        Self {
            intro_delay: Duration::from_millis(500),
            line_interval: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("summary template has no {{transcript}} placeholder")]
    MissingPlaceholder,
    #[error("rendered summary is empty")]
    EmptySummary,
}

/// Builds a local, templated summary when the upstream provider is unusable.
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    template: String,
    pacing: FallbackPacing,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE, FallbackPacing::default())
    }
}

impl FallbackGenerator {
    pub fn new(template: impl Into<String>, pacing: FallbackPacing) -> Self {
        Self {
            template: template.into(),
            pacing,
        }
    }

    pub fn pacing(&self) -> FallbackPacing {
        self.pacing
    }

    /// Embeds `source_text` verbatim into the summary template.
    pub fn render(&self, source_text: &str) -> Result<String, FallbackError> {
        if !self.template.contains(TRANSCRIPT_PLACEHOLDER) {
            return Err(FallbackError::MissingPlaceholder);
        }

        let summary = self.template.replace(TRANSCRIPT_PLACEHOLDER, source_text);
        if summary.trim().is_empty() {
            return Err(FallbackError::EmptySummary);
        }

        Ok(summary)
    }

    /// Streams the intro line, then the rendered summary line by line, then
    /// exactly one terminal chunk. Never fails; a rendering error becomes a
    /// single `Failed` chunk.
    pub fn generate(&self, source_text: &str) -> FallbackStream {
        let generator = self.clone();
        let source_text = source_text.to_string();

        Box::pin(async_stream::stream! {
            yield RawChunk::content(INTRO_MESSAGE);
            pause(generator.pacing.intro_delay).await;

            match generator.render(&source_text) {
                Ok(summary) => {
                    for line in summary.lines() {
                        yield RawChunk::content(format!("{line}\n"));
                        pause(generator.pacing.line_interval).await;
                    }
                    yield RawChunk::Completed;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Fallback summary could not be rendered");
                    yield RawChunk::failed(e.to_string());
                }
            }
        })
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
