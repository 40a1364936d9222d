mod repository_error;
mod summary_provider;
mod transcript_repository;

pub use repository_error::RepositoryError;
pub use summary_provider::{
    RawChunkStream, SummaryProvider, SummaryProviderError, SummaryRequest,
};
pub use transcript_repository::TranscriptRepository;
