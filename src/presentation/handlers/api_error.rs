use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Serialize)]
pub struct ApiError {
    pub message: String,
    pub r#type: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>, kind: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ApiError {
                message: message.into(),
                r#type: kind.to_string(),
            },
        }),
    )
        .into_response()
}
