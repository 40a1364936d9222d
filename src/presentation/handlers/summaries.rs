use std::convert::Infallible;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};

use crate::application::ports::SummaryProvider;
use crate::application::services::SummaryTarget;
use crate::domain::{ClientEvent, EventKind, VisitId};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Participants {
    pub doctor_id: String,
    pub patient_id: String,
}

#[derive(Serialize)]
pub struct SummaryOutcome {
    pub visit_id: VisitId,
    pub status: &'static str,
    pub event: ClientEvent,
}

/// Relays the visit summary as server-sent events, one `data:` record per
/// event, ending with a `completed` or `error` event.
#[tracing::instrument(
    skip_all,
    fields(visit_id = %visit_id, doctor_id = %participants.doctor_id, patient_id = %participants.patient_id)
)]
pub async fn stream_summary_handler<P>(
    State(state): State<AppState<P>>,
    Path(visit_id): Path<String>,
    Query(participants): Query<Participants>,
) -> Response
where
    P: SummaryProvider + ?Sized + 'static,
{
    let target = SummaryTarget {
        visit_id: VisitId::new(visit_id),
        doctor_id: participants.doctor_id,
        patient_id: participants.patient_id,
    };

    let events = state
        .summary_relay
        .summarize(target)
        .map(|event| Ok::<_, Infallible>(Event::default().data(event.to_json())));

    Sse::new(events)
        .keep_alive(
            KeepAlive::new()
                .interval(state.sse_keep_alive)
                .text("keep-alive"),
        )
        .into_response()
}

/// Runs the relay to completion and answers with its terminal event only.
#[tracing::instrument(skip_all, fields(visit_id = %target.visit_id))]
pub async fn create_summary_handler<P>(
    State(state): State<AppState<P>>,
    Json(target): Json<SummaryTarget>,
) -> Response
where
    P: SummaryProvider + ?Sized + 'static,
{
    let visit_id = target.visit_id.clone();
    let event = state.summary_relay.summarize_to_completion(target).await;

    let (status_code, status) = match event.kind() {
        EventKind::Completed => (StatusCode::OK, "SUCCESS"),
        _ => (StatusCode::UNPROCESSABLE_ENTITY, "ERROR"),
    };

    tracing::info!(status = status, "Blocking summary finished");

    (
        status_code,
        Json(SummaryOutcome {
            visit_id,
            status,
            event,
        }),
    )
        .into_response()
}
