mod client_event;
mod raw_chunk;
mod transcript;
mod visit_id;

pub use client_event::{COMPLETED_MESSAGE, ClientEvent, EventKind, MessageContent};
pub use raw_chunk::{COMPLETED_SENTINEL, ERROR_SENTINEL_PREFIX, RawChunk};
pub use transcript::Transcript;
pub use visit_id::VisitId;
