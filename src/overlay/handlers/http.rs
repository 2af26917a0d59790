use crate::app_context::AppContext;
use crate::html::overlay::OVERLAY_PAGE;
use crate::html::watcher::NAVIGATION_WATCHER;
use crate::messages::{MessageOrigin, PageMessage};
use crate::overlay::handlers::requests::NavigationRequest;
use crate::overlay::state::OverlaySnapshot;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, Json};

pub async fn page() -> Html<&'static str> {
    Html(OVERLAY_PAGE)
}

pub async fn watcher() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        NAVIGATION_WATCHER,
    )
}

#[axum::debug_handler]
pub async fn state(
    State(app_context): State<AppContext>,
) -> Result<Json<OverlaySnapshot>, StatusCode> {
    app_context
        .overlay
        .snapshot()
        .await
        .map(Json)
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

#[axum::debug_handler]
pub async fn toggle(
    State(app_context): State<AppContext>,
) -> Result<Json<OverlaySnapshot>, StatusCode> {
    app_context
        .overlay
        .toggle()
        .await
        .map(Json)
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

/// Reports a location change of the game page, e.g. a client-side route change.
#[axum::debug_handler]
pub async fn navigation(
    State(app_context): State<AppContext>,
    Json(request): Json<NavigationRequest>,
) -> StatusCode {
    app_context.bus.publish(
        MessageOrigin {
            page: app_context.page,
        },
        PageMessage::Navigation { href: request.href },
    );
    StatusCode::ACCEPTED
}
