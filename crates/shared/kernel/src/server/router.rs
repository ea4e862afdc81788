use super::{ApiState, health};
use std::sync::LazyLock;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Operational routes (`/health`). Starts the uptime clock.
pub fn system_router() -> OpenApiRouter<ApiState> {
    LazyLock::force(&health::START_TIME);
    OpenApiRouter::new().routes(routes!(health::health_handler))
}
