use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use anamnesis::application::ports::{RepositoryError, TranscriptRepository};
use anamnesis::application::services::{
    DEFAULT_TEMPLATE, FallbackGenerator, FallbackPacing, SummaryRelay, SummaryTarget,
};
use anamnesis::domain::{ClientEvent, EventKind, MessageContent, Transcript, VisitId};
use anamnesis::infrastructure::llm::{ScriptedStep, ScriptedSummaryProvider};
use anamnesis::infrastructure::persistence::InMemoryTranscriptRepository;

pub const TEST_VISIT_ID: &str = "visit-001";
pub const TEST_TRANSCRIPT: &str = "Patient reports a dry cough for three days and mild fever.";
pub const TEST_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(200);

pub async fn repository_with(text: &str) -> Arc<InMemoryTranscriptRepository> {
    let repository = Arc::new(InMemoryTranscriptRepository::new());
    repository
        .upsert(&Transcript::new(VisitId::new(TEST_VISIT_ID), text.to_string()))
        .await
        .unwrap();
    repository
}

pub fn immediate_fallback() -> FallbackGenerator {
    FallbackGenerator::new(DEFAULT_TEMPLATE, FallbackPacing::immediate())
}

pub fn relay(
    repository: Arc<dyn TranscriptRepository>,
    provider: Arc<ScriptedSummaryProvider>,
) -> SummaryRelay<ScriptedSummaryProvider> {
    SummaryRelay::new(
        repository,
        provider,
        immediate_fallback(),
        TEST_UPSTREAM_TIMEOUT,
    )
}

pub fn scripted(lines: &[&str]) -> Arc<ScriptedSummaryProvider> {
    Arc::new(ScriptedSummaryProvider::new(
        lines
            .iter()
            .map(|line| ScriptedStep::Emit(line.to_string()))
            .collect(),
    ))
}

pub fn target() -> SummaryTarget {
    SummaryTarget {
        visit_id: VisitId::new(TEST_VISIT_ID),
        doctor_id: "doctor-7".to_string(),
        patient_id: "patient-42".to_string(),
    }
}

pub async fn collect_events(
    relay: &SummaryRelay<ScriptedSummaryProvider>,
) -> Vec<ClientEvent> {
    relay.summarize(target()).collect().await
}

pub fn kinds(events: &[ClientEvent]) -> Vec<EventKind> {
    events.iter().map(ClientEvent::kind).collect()
}

pub fn text_of(event: &ClientEvent) -> Option<&str> {
    match event {
        ClientEvent::Message {
            content: MessageContent::Text(text),
        } => Some(text),
        _ => None,
    }
}

pub fn message_of(event: &ClientEvent) -> Option<&str> {
    match event {
        ClientEvent::Completed { message } | ClientEvent::Error { message } => Some(message),
        ClientEvent::Message { .. } => None,
    }
}

/// Asserts the stream invariant: exactly one terminal event, and it is last.
pub fn assert_single_terminal(events: &[ClientEvent]) {
    let terminal_positions: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.is_terminal())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(terminal_positions, vec![events.len() - 1]);
}

pub struct FailingTranscriptRepository;

#[async_trait::async_trait]
impl TranscriptRepository for FailingTranscriptRepository {
    async fn find(&self, _visit_id: &VisitId) -> Result<Option<Transcript>, RepositoryError> {
        Err(RepositoryError::ConnectionFailed("database unreachable".to_string()))
    }

    async fn upsert(&self, _transcript: &Transcript) -> Result<(), RepositoryError> {
        Err(RepositoryError::ConnectionFailed("database unreachable".to_string()))
    }

    async fn delete(&self, _visit_id: &VisitId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::ConnectionFailed("database unreachable".to_string()))
    }

    async fn list(&self) -> Result<Vec<Transcript>, RepositoryError> {
        Err(RepositoryError::ConnectionFailed("database unreachable".to_string()))
    }
}
