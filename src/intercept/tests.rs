use crate::intercept::consts::MAX_INSPECTED_BODY_SIZE;
use crate::intercept::{is_metadata_call, InterceptLayer, InterceptorInstaller};
use crate::messages::{Envelope, MessageBus, MessageOrigin, PageId, PageMessage};
use axum::body::Body;
use http::{Method, Request, Response, StatusCode, Uri};
use serde_json::json;
use std::convert::Infallible;
use tokio::sync::broadcast::error::TryRecvError;
use tower::{service_fn, Layer, Service, ServiceExt};

const METADATA_URI: &str =
    "https://maps.googleapis.com/$rpc/google.internal.maps.mapsjs.v1.MapsJsInternalService/GetMetadata";

fn metadata_body() -> String {
    json!([
        [0],
        [[null, null, null, null, null, [[null, [[null, null, 35.6875, 139.75]]]]]],
    ])
    .to_string()
}

fn upstream(
    status: StatusCode,
    body: String,
) -> impl Service<Request<Body>, Response = Response<Body>, Error = Infallible, Future: Send> + Clone
{
    service_fn(move |_request: Request<Body>| {
        let body = body.clone();
        async move {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            Ok::<_, Infallible>(response)
        }
    })
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn installed_layer(bus: &MessageBus) -> (InterceptLayer, PageId) {
    let page = PageId::random();
    let installer = InterceptorInstaller::new(page, bus.clone());
    let installation = installer.install().expect("First install must succeed.");
    (InterceptLayer::new(installation), page)
}

#[test]
fn test_metadata_call_predicate() {
    let uri = Uri::from_static(METADATA_URI);

    assert!(is_metadata_call(&Method::POST, &uri));
    assert!(!is_metadata_call(&Method::GET, &uri));
    assert!(!is_metadata_call(
        &Method::POST,
        &Uri::from_static("https://maps.googleapis.com/maps/api/js/SingleImageSearch")
    ));
}

#[test]
fn test_installer_hands_out_a_single_installation() {
    let installer = InterceptorInstaller::new(PageId::random(), MessageBus::default());

    assert!(installer.install().is_some());
    assert!(installer.install().is_none());
    assert!(installer.install().is_none());
}

#[tokio::test]
async fn test_metadata_response_publishes_coordinates() {
    let bus = MessageBus::default();
    let mut receiver = bus.subscribe();
    let (layer, page) = installed_layer(&bus);
    let service = layer.layer(upstream(StatusCode::OK, metadata_body()));

    let response = service
        .oneshot(request(Method::POST, METADATA_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, metadata_body());
    assert_eq!(
        receiver.try_recv().unwrap(),
        Envelope {
            origin: MessageOrigin { page },
            message: PageMessage::Coordinates {
                lat: 35.6875,
                lng: 139.75
            },
        }
    );
    assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_other_calls_pass_through_unobserved() {
    let bus = MessageBus::default();
    let mut receiver = bus.subscribe();
    let (layer, _page) = installed_layer(&bus);
    let service = layer.layer(upstream(StatusCode::OK, metadata_body()));

    let get_response = service
        .clone()
        .oneshot(request(Method::GET, METADATA_URI))
        .await
        .unwrap();
    let other_response = service
        .oneshot(request(
            Method::POST,
            "https://maps.googleapis.com/maps/api/js/SingleImageSearch",
        ))
        .await
        .unwrap();

    assert_eq!(body_text(get_response).await, metadata_body());
    assert_eq!(body_text(other_response).await, metadata_body());
    assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_failed_metadata_response_is_not_read() {
    let bus = MessageBus::default();
    let mut receiver = bus.subscribe();
    let (layer, _page) = installed_layer(&bus);
    let service = layer.layer(upstream(StatusCode::INTERNAL_SERVER_ERROR, metadata_body()));

    let response = service
        .oneshot(request(Method::POST, METADATA_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, metadata_body());
    assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_unparsable_metadata_emits_nothing() {
    let bus = MessageBus::default();
    let mut receiver = bus.subscribe();
    let (layer, _page) = installed_layer(&bus);
    let body = String::from(r#"[[1],["no coordinates here"]]"#);
    let service = layer.layer(upstream(StatusCode::OK, body.clone()));

    let response = service
        .oneshot(request(Method::POST, METADATA_URI))
        .await
        .unwrap();

    assert_eq!(body_text(response).await, body);
    assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_oversized_metadata_response_is_forwarded_whole() {
    let bus = MessageBus::default();
    let mut receiver = bus.subscribe();
    let (layer, _page) = installed_layer(&bus);
    let body = format!("{}12.5,-70.25", " ".repeat(MAX_INSPECTED_BODY_SIZE));
    let service = layer.layer(upstream(StatusCode::OK, body.clone()));

    let response = service
        .oneshot(request(Method::POST, METADATA_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let forwarded = body_text(response).await;
    assert_eq!(forwarded.len(), body.len());
    assert!(forwarded == body);
    assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
}
