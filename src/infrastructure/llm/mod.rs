mod scripted_summary_provider;
mod streaming_client;

pub use scripted_summary_provider::{ScriptedStep, ScriptedSummaryProvider};
pub use streaming_client::{StreamingSummaryClient, create_streaming_summary_client};
