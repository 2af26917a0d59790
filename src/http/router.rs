use crate::app_context::AppContext;
use crate::cli::Args;
use crate::intercept::{InterceptLayer, Installation};
use crate::{health, http::cors, overlay};
use axum::body::Body;
use axum::{
    routing::{any, get, post},
    Router,
};
use http::{Request, Response};
use std::convert::Infallible;
use tower::{Service, ServiceBuilder};

/// Routes of the service itself; everything else is proxied to `upstream` through the
/// metadata interceptor.
pub fn new<S>(
    args: &Args,
    app_context: AppContext,
    installation: Installation,
    upstream: S,
) -> Router
where
    S: Service<Request<Body>, Response = Response<Body>, Error = Infallible>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let cors_policy = cors::layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let overlay_routes = Router::new()
        .route("/", get(overlay::handlers::http::page))
        .route("/watcher.js", get(overlay::handlers::http::watcher))
        .route("/ws", any(overlay::handlers::ws::ws))
        .route("/state", get(overlay::handlers::http::state))
        .route("/toggle", post(overlay::handlers::http::toggle))
        .route("/navigation", post(overlay::handlers::http::navigation));
    let proxy = ServiceBuilder::new()
        .layer(InterceptLayer::new(installation))
        .service(upstream);

    Router::new()
        .nest("/health", health_routes)
        .nest("/overlay", overlay_routes)
        .fallback_service(proxy)
        .with_state(app_context)
        .layer(cors_policy)
        .layer(axum::middleware::from_fn(crate::http::middleware::tracing))
}
