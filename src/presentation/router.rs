use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::urls::{MOUNT_POINT, URLPATTERNS, UrlConf};
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the application router.
///
/// Fails when the route table is misconfigured, before any request is served.
pub fn app(state: AppState) -> anyhow::Result<Router> {
    let urls = UrlConf::new(&URLPATTERNS)?;
    tracing::debug!(routes = urls.routes().len(), mount = MOUNT_POINT, "route table loaded");

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest(MOUNT_POINT, urls.router())
        .layer(cors_layer()?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
