use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{RepositoryError, TranscriptRepository};
use crate::domain::{Transcript, VisitId};

/// Process-local transcript store keyed by visit id.
#[derive(Default)]
pub struct InMemoryTranscriptRepository {
    transcripts: RwLock<HashMap<VisitId, Transcript>>,
}

impl InMemoryTranscriptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptRepository for InMemoryTranscriptRepository {
    #[instrument(skip_all, fields(visit_id = %visit_id))]
    async fn find(&self, visit_id: &VisitId) -> Result<Option<Transcript>, RepositoryError> {
        Ok(self.transcripts.read().await.get(visit_id).cloned())
    }

    #[instrument(skip_all, fields(visit_id = %transcript.visit_id))]
    async fn upsert(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        let mut transcripts = self.transcripts.write().await;
        let stored = match transcripts.get(&transcript.visit_id) {
            Some(existing) => Transcript {
                created_at: existing.created_at,
                ..transcript.clone()
            },
            None => transcript.clone(),
        };
        transcripts.insert(stored.visit_id.clone(), stored);
        Ok(())
    }

    #[instrument(skip_all, fields(visit_id = %visit_id))]
    async fn delete(&self, visit_id: &VisitId) -> Result<bool, RepositoryError> {
        Ok(self.transcripts.write().await.remove(visit_id).is_some())
    }

    async fn list(&self) -> Result<Vec<Transcript>, RepositoryError> {
        let mut transcripts: Vec<Transcript> =
            self.transcripts.read().await.values().cloned().collect();
        transcripts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(transcripts)
    }
}
