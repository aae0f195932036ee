use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Success body carrying a message next to a single named payload.
#[derive(Debug, Serialize)]
pub struct EventBody<'a, T>
where
    T: Serialize,
{
    pub message: &'a str,
    pub event: T,
}

pub fn success<T>(body: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Response {
    let body = MessageBody {
        message: message.into(),
        error: detail,
    };

    (status, Json(body)).into_response()
}
