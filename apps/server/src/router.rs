use axum::Router;
use axum::middleware::from_fn_with_state;
use folio::kernel::server::{ApiState, assets, cors};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Folio relay", description = "Relays portfolio contact-form submissions by email"))]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(folio::server::router::api_router())
        .split_for_parts();

    let mut router = openapi_routes.merge(Scalar::with_url("/api", api_doc));

    // Anything unrouted is looked up in the built site
    if let Some(site) = assets::static_site(&state.config.storage.static_dir) {
        router = router.fallback_service(site);
    }

    router
        .layer(from_fn_with_state(state.clone(), cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
