use futures::stream::{Stream, StreamExt};
use serde_json::value::RawValue;

use crate::domain::{ClientEvent, MessageContent, RawChunk};

/// Substring that marks a content chunk as a pre-formatted summary document.
pub const STRUCTURED_MARKER: &str = "properties";

/// Maps one producer chunk onto the event a subscriber sees.
///
/// Pure and total: the same chunk always yields the same event.
pub fn translate(chunk: &RawChunk) -> ClientEvent {
    match chunk {
        RawChunk::Completed => ClientEvent::completed(),
        RawChunk::Failed(message) => ClientEvent::error(message.clone()),
        RawChunk::Content(text) => match structured_payload(text) {
            Some(payload) => ClientEvent::Message {
                content: MessageContent::Structured(payload),
            },
            None => ClientEvent::text(text.clone()),
        },
    }
}

/// Lazily translates every chunk of `chunks`, one event per chunk, in order.
/// This is `translate` lifted over a whole stream; the relay translates chunk
/// by chunk itself because it switches producers mid-stream.
pub fn translate_stream<S>(chunks: S) -> impl Stream<Item = ClientEvent>
where
    S: Stream<Item = RawChunk>,
{
    chunks.map(|chunk| translate(&chunk))
}

/// Compacts a structured summary onto one line and returns it when it is
/// valid JSON. Anything that fails to parse is relayed as free text.
fn structured_payload(text: &str) -> Option<Box<RawValue>> {
    if !text.trim_start().starts_with('{') || !text.contains(STRUCTURED_MARKER) {
        return None;
    }

    let compact = text.replace(['\r', '\n'], "").replace("  ", "");
    RawValue::from_string(compact.trim().to_string()).ok()
}
