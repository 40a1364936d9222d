use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    RawChunkStream, SummaryProvider, SummaryProviderError, SummaryRequest,
};
use crate::domain::{COMPLETED_SENTINEL, RawChunk};

/// One step of a scripted upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedStep {
    /// A sentinel-protocol line; `{transcript}`, `{doctor_id}` and
    /// `{patient_id}` are substituted first.
    Emit(String),
    /// A structured summary document built from the request.
    SummaryDocument,
    /// The upstream stream fails with this message.
    Raise(String),
    /// The upstream stops producing without ending the stream.
    Stall,
}

/// Local summary provider that replays a fixed script. Used in scaffold mode
/// and wherever the upstream must be simulated.
pub struct ScriptedSummaryProvider {
    steps: Vec<ScriptedStep>,
    call_error: Option<String>,
    step_delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSummaryProvider {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self {
            steps,
            call_error: None,
            step_delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Script used when no real upstream is configured.
    pub fn scaffold() -> Self {
        Self::new(vec![
            ScriptedStep::Emit("Analyzing the visit transcript...".to_string()),
            ScriptedStep::SummaryDocument,
            ScriptedStep::Emit(COMPLETED_SENTINEL.to_string()),
        ])
    }

    /// Every call fails before a stream is opened.
    pub fn failing(message: impl Into<String>) -> Self {
        let mut provider = Self::new(Vec::new());
        provider.call_error = Some(message.into());
        provider
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryProvider for ScriptedSummaryProvider {
    async fn stream_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<RawChunkStream, SummaryProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.call_error {
            return Err(SummaryProviderError::ApiRequestFailed(message.clone()));
        }

        let steps = self.steps.clone();
        let step_delay = self.step_delay;
        let request = request.clone();

        Ok(Box::pin(async_stream::stream! {
            for step in steps {
                if !step_delay.is_zero() {
                    tokio::time::sleep(step_delay).await;
                }
                match step {
                    ScriptedStep::Emit(line) => {
                        yield Ok(RawChunk::from_sentinel(&substitute(&line, &request)));
                    }
                    ScriptedStep::SummaryDocument => {
                        yield Ok(RawChunk::Content(summary_document(&request)));
                    }
                    ScriptedStep::Raise(message) => {
                        yield Err(SummaryProviderError::ApiRequestFailed(message));
                        return;
                    }
                    ScriptedStep::Stall => {
                        futures::future::pending::<()>().await;
                    }
                }
            }
        }))
    }
}

fn substitute(line: &str, request: &SummaryRequest) -> String {
    line.replace("{transcript}", &request.source_text)
        .replace("{doctor_id}", &request.doctor_id)
        .replace("{patient_id}", &request.patient_id)
}

fn summary_document(request: &SummaryRequest) -> String {
    let document = serde_json::json!({
        "type": "object",
        "properties": {
            "doctor_id": request.doctor_id,
            "patient_id": request.patient_id,
            "symptom_details": request.source_text,
            "vital_signs": "not recorded",
            "past_medical_history": "not recorded",
            "current_medications": "not recorded",
        }
    });
    serde_json::to_string_pretty(&document).unwrap_or_default()
}
