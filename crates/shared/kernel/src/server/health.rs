use crate::domain::config::TransportKind;
use crate::domain::constants::SYSTEM_TAG;
use crate::server::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use folio_derive::{api_handler, api_model};
use std::sync::LazyLock;
use std::time::Instant;

#[api_model]
/// Liveness report
pub(crate) struct HealthResponse {
    /// Always `up` when the process answers
    status: String,
    /// Crate version
    version: String,
    /// Seconds since the first health check
    uptime: u64,
    /// Configured outbound mail channel
    transport: String,
}

pub(super) static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Healthcheck endpoint", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let transport: TransportKind = state.config.mail.transport;
    let body = HealthResponse {
        status: "up".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: START_TIME.elapsed().as_secs(),
        transport: transport.to_string(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
