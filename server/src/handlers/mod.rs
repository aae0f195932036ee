use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod events;

pub use events::{get_event, missing_slug};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "eventful-api",
    };

    success(payload)
}
