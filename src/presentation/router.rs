use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::SummaryProvider;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_summary_handler, delete_transcript_handler, get_transcript_handler, health_handler,
    list_transcripts_handler, stream_summary_handler, upsert_transcript_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: SummaryProvider + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/transcripts", get(list_transcripts_handler::<P>))
        .route(
            "/api/v1/transcripts/{visit_id}",
            put(upsert_transcript_handler::<P>)
                .get(get_transcript_handler::<P>)
                .delete(delete_transcript_handler::<P>),
        )
        .route("/api/v1/summaries", post(create_summary_handler::<P>))
        .route(
            "/api/v1/summaries/{visit_id}/stream",
            post(stream_summary_handler::<P>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
