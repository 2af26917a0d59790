use crate::cli::Args;
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

pub fn layer(args: &Args) -> CorsLayer {
    let origins = args
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin {origin:?}.");
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::header::ORIGIN,
            http::header::REFERER,
            http::header::USER_AGENT,
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
