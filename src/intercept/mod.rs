//! Transparent interception of upstream `GetMetadata` calls.

use crate::extraction::{self, models::ExtractionAttempt};
use crate::messages::{MessageBus, MessageOrigin, PageMessage};
use axum::body::Body;
use consts::{MAX_INSPECTED_BODY_SIZE, METADATA_PATH_MARKER};
use futures_util::future::BoxFuture;
use http::{Method, Request, Response, StatusCode, Uri};
use std::task::{Context, Poll};
use tower::{Layer, Service};

pub mod consts;
pub mod installer;
#[cfg(test)]
mod tests;

pub use installer::{Installation, InterceptorInstaller};

pub fn is_metadata_call(method: &Method, uri: &Uri) -> bool {
    method == Method::POST && uri.to_string().contains(METADATA_PATH_MARKER)
}

#[derive(Clone)]
pub struct InterceptLayer {
    origin: MessageOrigin,
    bus: MessageBus,
}

impl InterceptLayer {
    pub fn new(installation: Installation) -> Self {
        Self {
            origin: installation.origin,
            bus: installation.bus,
        }
    }
}

impl<S> Layer<S> for InterceptLayer {
    type Service = InterceptService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptService {
            inner,
            origin: self.origin,
            bus: self.bus.clone(),
        }
    }
}

/// Forwards every call to the wrapped service unchanged, and reads the body of successful
/// metadata responses on the way back.
#[derive(Clone)]
pub struct InterceptService<S> {
    inner: S,
    origin: MessageOrigin,
    bus: MessageBus,
}

impl<S> Service<Request<Body>> for InterceptService<S>
where
    S: Service<Request<Body>, Response = Response<Body>>,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let intercepted = is_metadata_call(request.method(), request.uri());
        let response_future = self.inner.call(request);
        if !intercepted {
            return Box::pin(response_future);
        }
        let origin = self.origin;
        let bus = self.bus.clone();
        Box::pin(async move {
            let response = response_future.await?;
            Ok(observe(response, origin, &bus).await)
        })
    }
}

async fn observe(response: Response<Body>, origin: MessageOrigin, bus: &MessageBus) -> Response<Body> {
    if !response.status().is_success() {
        return response;
    }
    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!("Failed to read intercepted metadata response body: {err}");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::BAD_GATEWAY;
            return response;
        }
    };
    if bytes.len() > MAX_INSPECTED_BODY_SIZE {
        tracing::debug!(
            task = "metadata_intercepted",
            body_size = bytes.len(),
            "Metadata response is too large to inspect."
        );
    } else {
        inspect(&bytes, origin, bus);
    }
    Response::from_parts(parts, Body::from(bytes))
}

fn inspect(bytes: &[u8], origin: MessageOrigin, bus: &MessageBus) {
    let attempt = extraction::extract(&String::from_utf8_lossy(bytes));
    let provenance = attempt.provenance();
    let coordinates = match attempt {
        ExtractionAttempt::Extracted { coordinates, .. } => coordinates,
        ExtractionAttempt::Failed(failure) => {
            tracing::debug!(
                task = "metadata_intercepted",
                provenance = provenance.as_str(),
                "{failure}"
            );
            return;
        }
    };
    tracing::info!(
        task = "metadata_intercepted",
        provenance = provenance.as_str(),
        lat = coordinates.lat,
        lng = coordinates.lng,
    );
    bus.publish(
        origin,
        PageMessage::Coordinates {
            lat: coordinates.lat,
            lng: coordinates.lng,
        },
    );
}
