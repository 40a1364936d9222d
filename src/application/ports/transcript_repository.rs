use async_trait::async_trait;

use crate::domain::{Transcript, VisitId};

use super::RepositoryError;

#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    async fn find(&self, visit_id: &VisitId) -> Result<Option<Transcript>, RepositoryError>;

    async fn upsert(&self, transcript: &Transcript) -> Result<(), RepositoryError>;

    /// Returns `false` when no transcript was stored for `visit_id`.
    async fn delete(&self, visit_id: &VisitId) -> Result<bool, RepositoryError>;

    async fn list(&self) -> Result<Vec<Transcript>, RepositoryError>;
}
