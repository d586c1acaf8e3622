use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub const SERVICE_NAME: &str = "auth-server";

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: SERVICE_NAME,
    };

    success(payload, "Health check successful").into_response()
}

pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("No route for '{}'", uri.path())).into_response()
}
