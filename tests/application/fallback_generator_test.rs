use std::time::{Duration, Instant};

use futures::StreamExt;

use anamnesis::application::services::{
    DEFAULT_TEMPLATE, FallbackGenerator, FallbackPacing, INTRO_MESSAGE,
};
use anamnesis::domain::RawChunk;

#[tokio::test]
async fn given_default_template_when_generating_then_lines_follow_intro_and_end_completed() {
    let generator = FallbackGenerator::new(DEFAULT_TEMPLATE, FallbackPacing::immediate());

    let chunks: Vec<RawChunk> = generator.generate("sore throat").collect().await;

    assert_eq!(chunks.first(), Some(&RawChunk::content(INTRO_MESSAGE)));
    assert_eq!(chunks.last(), Some(&RawChunk::Completed));
    assert_eq!(chunks.iter().filter(|c| c.is_terminal()).count(), 1);

    let lines: Vec<RawChunk> = DEFAULT_TEMPLATE
        .replace("{transcript}", "sore throat")
        .lines()
        .map(|line| RawChunk::content(format!("{line}\n")))
        .collect();
    assert_eq!(&chunks[1..chunks.len() - 1], lines.as_slice());
}

#[tokio::test]
async fn given_multiline_transcript_when_generating_then_each_line_is_its_own_chunk() {
    let generator = FallbackGenerator::new("Record: {transcript}", FallbackPacing::immediate());

    let chunks: Vec<RawChunk> = generator.generate("line one\nline \"two\"").collect().await;

    assert_eq!(
        chunks,
        vec![
            RawChunk::content(INTRO_MESSAGE),
            RawChunk::content("Record: line one\n"),
            RawChunk::content("line \"two\"\n"),
            RawChunk::Completed,
        ]
    );
}

#[tokio::test]
async fn given_template_without_placeholder_when_generating_then_only_error_follows_intro() {
    let generator = FallbackGenerator::new("Nothing to see", FallbackPacing::immediate());

    let chunks: Vec<RawChunk> = generator.generate("anything").collect().await;

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0], RawChunk::content(INTRO_MESSAGE));
    assert!(matches!(&chunks[1], RawChunk::Failed(m) if m.contains("placeholder")));
}

#[tokio::test]
async fn given_pacing_when_generating_then_pauses_are_applied() {
    let pacing = FallbackPacing {
        intro_delay: Duration::from_millis(20),
        line_interval: Duration::from_millis(10),
    };
    let generator = FallbackGenerator::new("{transcript}\nsecond", pacing);

    let started = Instant::now();
    let chunks: Vec<RawChunk> = generator.generate("first").collect().await;

    assert_eq!(chunks.len(), 4);
    assert!(started.elapsed() >= Duration::from_millis(40));
}
