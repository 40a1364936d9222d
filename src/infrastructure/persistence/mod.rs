mod in_memory_transcript_repository;

pub use in_memory_transcript_repository::InMemoryTranscriptRepository;
