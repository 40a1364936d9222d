use anamnesis::application::ports::TranscriptRepository;
use anamnesis::domain::{Transcript, VisitId};
use anamnesis::infrastructure::persistence::InMemoryTranscriptRepository;

#[tokio::test]
async fn given_stored_transcript_when_finding_then_returns_it() {
    let repository = InMemoryTranscriptRepository::new();
    let transcript = Transcript::new(VisitId::new("v-1"), "cough".to_string())
        .with_participants(Some("d-1".to_string()), Some("p-1".to_string()));

    repository.upsert(&transcript).await.unwrap();
    let found = repository.find(&VisitId::new("v-1")).await.unwrap();

    assert_eq!(found, Some(transcript));
}

#[tokio::test]
async fn given_unknown_visit_when_finding_then_returns_none() {
    let repository = InMemoryTranscriptRepository::new();

    assert!(repository.find(&VisitId::new("nope")).await.unwrap().is_none());
}

#[tokio::test]
async fn given_existing_transcript_when_upserting_then_text_replaced_and_created_at_kept() {
    let repository = InMemoryTranscriptRepository::new();
    let original = Transcript::new(VisitId::new("v-1"), "first draft".to_string());
    repository.upsert(&original).await.unwrap();

    let revised = Transcript::new(VisitId::new("v-1"), "final text".to_string());
    repository.upsert(&revised).await.unwrap();

    let stored = repository.find(&VisitId::new("v-1")).await.unwrap().unwrap();
    assert_eq!(stored.text, "final text");
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(repository.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_stored_transcript_when_deleting_then_reports_removal_once() {
    let repository = InMemoryTranscriptRepository::new();
    repository
        .upsert(&Transcript::new(VisitId::new("v-1"), "cough".to_string()))
        .await
        .unwrap();

    assert!(repository.delete(&VisitId::new("v-1")).await.unwrap());
    assert!(!repository.delete(&VisitId::new("v-1")).await.unwrap());
    assert!(repository.list().await.unwrap().is_empty());
}
