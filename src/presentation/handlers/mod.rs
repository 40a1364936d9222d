mod api_error;
mod health;
mod summaries;
mod transcripts;

pub use api_error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use summaries::{
    Participants, SummaryOutcome, create_summary_handler, stream_summary_handler,
};
pub use transcripts::{
    UpsertTranscriptRequest, delete_transcript_handler, get_transcript_handler,
    list_transcripts_handler, upsert_transcript_handler,
};
