use axum::http::StatusCode;

/// `GET /healthz` — process liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness to accept traffic.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
