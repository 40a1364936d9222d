use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use anamnesis::application::ports::{SummaryProvider, TranscriptRepository};
use anamnesis::application::services::SummaryRelay;
use anamnesis::infrastructure::llm::{ScriptedSummaryProvider, create_streaming_summary_client};
use anamnesis::infrastructure::observability::{TracingConfig, init_tracing};
use anamnesis::infrastructure::persistence::InMemoryTranscriptRepository;
use anamnesis::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let provider: Arc<dyn SummaryProvider> = match settings.llm.provider.as_str() {
        "scripted" => {
            tracing::warn!("Using the scripted summary provider; no upstream is contacted");
            Arc::new(ScriptedSummaryProvider::scaffold())
        }
        _ => Arc::new(
            create_streaming_summary_client(&settings.llm)
                .context("Failed to configure the summary provider")?,
        ),
    };

    let transcript_repository: Arc<dyn TranscriptRepository> =
        Arc::new(InMemoryTranscriptRepository::new());

    let summary_relay = Arc::new(SummaryRelay::new(
        Arc::clone(&transcript_repository),
        provider,
        settings.fallback.generator(),
        settings.llm.request_timeout(),
    ));

    let state = AppState {
        summary_relay,
        transcript_repository,
        sse_keep_alive: settings.llm.sse_keep_alive(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, provider = %settings.llm.provider, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
