use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SummaryProvider, TranscriptRepository};
use crate::application::services::SummaryRelay;

pub struct AppState<P>
where
    P: SummaryProvider + ?Sized,
{
    pub summary_relay: Arc<SummaryRelay<P>>,
    pub transcript_repository: Arc<dyn TranscriptRepository>,
    pub sse_keep_alive: Duration,
}

impl<P> Clone for AppState<P>
where
    P: SummaryProvider + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            summary_relay: Arc::clone(&self.summary_relay),
            transcript_repository: Arc::clone(&self.transcript_repository),
            sse_keep_alive: self.sse_keep_alive,
        }
    }
}
