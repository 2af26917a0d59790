use crate::cli::tests::fake_args;
use crate::http::tests::serve_locally;
use crate::proxy::{target_url, UpstreamService};
use axum::body::Body;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use http::{Request, StatusCode, Uri};
use tower::ServiceExt;
use url::Url;

#[test]
fn test_target_keeps_path_and_query() {
    let upstream = Url::parse("https://maps.googleapis.com").unwrap();
    let uri = Uri::from_static(
        "/$rpc/google.internal.maps.mapsjs.v1.MapsJsInternalService/GetMetadata?authuser=0",
    );

    let target = target_url(&upstream, &uri);

    assert_eq!(
        target.as_str(),
        "https://maps.googleapis.com/$rpc/google.internal.maps.mapsjs.v1.MapsJsInternalService/GetMetadata?authuser=0"
    );
}

#[test]
fn test_target_replaces_upstream_path() {
    let upstream = Url::parse("http://127.0.0.1:9000/ignored/").unwrap();

    let target = target_url(&upstream, &Uri::from_static("/maps/api/js"));

    assert_eq!(target.as_str(), "http://127.0.0.1:9000/maps/api/js");
}

#[test]
fn test_target_of_bare_root() {
    let upstream = Url::parse("https://maps.googleapis.com").unwrap();

    let target = target_url(&upstream, &Uri::from_static("/"));

    assert_eq!(target.as_str(), "https://maps.googleapis.com/");
}

#[test]
fn test_scheme_relative_path_stays_on_upstream() {
    let upstream = Url::parse("https://maps.googleapis.com").unwrap();

    let target = target_url(&upstream, &Uri::from_static("//evil.example/steal?x=1"));

    assert_eq!(target.host_str(), Some("maps.googleapis.com"));
    assert_eq!(target.path(), "//evil.example/steal");
    assert_eq!(target.query(), Some("x=1"));
}

#[tokio::test]
async fn test_upstream_redirects_are_passed_back() {
    let router = Router::new()
        .route("/moved", get(|| async { Redirect::temporary("/elsewhere") }))
        .route("/elsewhere", get(|| async { "followed" }));
    let mut args = fake_args();
    args.upstream_url = serve_locally(router).await;
    let upstream = UpstreamService::new(&args).unwrap();

    let request = Request::builder()
        .uri("/moved")
        .body(Body::empty())
        .unwrap();
    let response = upstream.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(http::header::LOCATION).unwrap(),
        "/elsewhere"
    );
}

#[tokio::test]
async fn test_request_is_forwarded_with_path_and_query() {
    let router = Router::new().route(
        "/maps/api/js",
        get(|uri: Uri| async move { format!("upstream saw {uri}") }),
    );
    let mut args = fake_args();
    args.upstream_url = serve_locally(router).await;
    let upstream = UpstreamService::new(&args).unwrap();

    let request = Request::builder()
        .uri("/maps/api/js?v=3")
        .body(Body::empty())
        .unwrap();
    let response = upstream.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"upstream saw /maps/api/js?v=3");
}
