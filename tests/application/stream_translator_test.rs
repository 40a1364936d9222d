use futures::StreamExt;

use anamnesis::application::services::{translate, translate_stream};
use anamnesis::domain::{ClientEvent, EventKind, RawChunk};

async fn translate_all(chunks: Vec<RawChunk>) -> Vec<ClientEvent> {
    translate_stream(futures::stream::iter(chunks)).collect().await
}

#[tokio::test]
async fn given_sequence_ending_in_completion_when_translating_then_no_error_events() {
    let events = translate_all(vec![
        RawChunk::from_sentinel("Symptoms:"),
        RawChunk::from_sentinel("{\"properties\": {\"fever\": true}}"),
        RawChunk::from_sentinel("[COMPLETED]"),
    ])
    .await;

    assert_eq!(events.len(), 3);
    assert_eq!(events.last().unwrap().kind(), EventKind::Completed);
    assert!(events.iter().all(|e| e.kind() != EventKind::Error));
}

#[tokio::test]
async fn given_sequence_ending_in_error_marker_when_translating_then_message_is_stripped() {
    let events = translate_all(vec![
        RawChunk::from_sentinel("partial"),
        RawChunk::from_sentinel("[ERROR]upstream refused: 401"),
    ])
    .await;

    let last = events.last().unwrap();
    assert_eq!(last.kind(), EventKind::Error);
    assert_eq!(
        last.to_json(),
        r#"{"event":"error","message":"upstream refused: 401"}"#
    );
    assert_eq!(
        events.iter().filter(|e| e.kind() == EventKind::Error).count(),
        1
    );
}

#[test]
fn given_free_text_with_quotes_and_newline_when_translating_then_sse_frame_is_escaped() {
    let event = translate(&RawChunk::content("He said \"hi\"\nbye"));

    assert_eq!(
        event.to_sse_frame(),
        "data: {\"event\":\"message\",\"content\":\"He said \\\"hi\\\"\\nbye\"}\n\n"
    );
}

#[test]
fn given_same_chunk_when_translated_twice_then_output_is_byte_identical() {
    let chunks = [
        RawChunk::content("plain \"text\"\n"),
        RawChunk::content("{\"properties\":\n  {\"a\": 1}}"),
        RawChunk::Completed,
        RawChunk::failed("boom"),
    ];

    for chunk in &chunks {
        assert_eq!(translate(chunk).to_sse_frame(), translate(chunk).to_sse_frame());
    }
}

#[test]
fn given_structured_chunk_with_crlf_when_framing_then_single_data_line() {
    let event = translate(&RawChunk::content("{\r\n\"properties\": {\"x\": 1}\r\n}"));
    let frame = event.to_sse_frame();

    assert!(!frame.contains('\r'));
    assert_eq!(frame.matches("data:").count(), 1);
    assert_eq!(
        frame,
        "data: {\"event\":\"message\",\"content\":{\"properties\": {\"x\": 1}}}\n\n"
    );
}
