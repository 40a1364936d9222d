use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::ports::SummaryProvider;
use crate::domain::{Transcript, VisitId};
use crate::infrastructure::observability::sanitize_transcript;
use crate::presentation::state::AppState;

use super::api_error::error_response;

#[derive(Debug, Deserialize)]
pub struct UpsertTranscriptRequest {
    pub text: String,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
}

#[tracing::instrument(skip_all, fields(visit_id = %visit_id))]
pub async fn upsert_transcript_handler<P>(
    State(state): State<AppState<P>>,
    Path(visit_id): Path<String>,
    Json(request): Json<UpsertTranscriptRequest>,
) -> Response
where
    P: SummaryProvider + ?Sized + 'static,
{
    if request.text.trim().is_empty() {
        tracing::warn!("Rejected transcript with empty text");
        return error_response(
            StatusCode::BAD_REQUEST,
            "Transcript text must not be empty",
            "invalid_request_error",
        );
    }

    tracing::debug!(text = %sanitize_transcript(&request.text), "Storing transcript");

    let transcript = Transcript::new(VisitId::new(visit_id), request.text)
        .with_participants(request.doctor_id, request.patient_id);

    if let Err(e) = state.transcript_repository.upsert(&transcript).await {
        tracing::error!(error = %e, "Failed to store transcript");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to store transcript",
            "storage_error",
        );
    }

    match state.transcript_repository.find(&transcript.visit_id).await {
        Ok(Some(stored)) => (StatusCode::OK, Json(stored)).into_response(),
        Ok(None) => (StatusCode::OK, Json(transcript)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read back transcript");
            (StatusCode::OK, Json(transcript)).into_response()
        }
    }
}

#[tracing::instrument(skip_all, fields(visit_id = %visit_id))]
pub async fn get_transcript_handler<P>(
    State(state): State<AppState<P>>,
    Path(visit_id): Path<String>,
) -> Response
where
    P: SummaryProvider + ?Sized + 'static,
{
    match state
        .transcript_repository
        .find(&VisitId::new(visit_id.as_str()))
        .await
    {
        Ok(Some(transcript)) => (StatusCode::OK, Json(transcript)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("No transcript for visit {}", visit_id),
            "not_found",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Transcript lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Transcript lookup failed",
                "storage_error",
            )
        }
    }
}

pub async fn list_transcripts_handler<P>(State(state): State<AppState<P>>) -> Response
where
    P: SummaryProvider + ?Sized + 'static,
{
    match state.transcript_repository.list().await {
        Ok(transcripts) => (StatusCode::OK, Json(transcripts)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Listing transcripts failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Listing transcripts failed",
                "storage_error",
            )
        }
    }
}

#[tracing::instrument(skip_all, fields(visit_id = %visit_id))]
pub async fn delete_transcript_handler<P>(
    State(state): State<AppState<P>>,
    Path(visit_id): Path<String>,
) -> Response
where
    P: SummaryProvider + ?Sized + 'static,
{
    match state
        .transcript_repository
        .delete(&VisitId::new(visit_id.as_str()))
        .await
    {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            format!("No transcript for visit {}", visit_id),
            "not_found",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Deleting transcript failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Deleting transcript failed",
                "storage_error",
            )
        }
    }
}
