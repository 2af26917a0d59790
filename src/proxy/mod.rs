//! Forwarding of everything the service does not handle itself to the upstream origin.

use crate::cli::Args;
use axum::body::Body;
use consts::MAX_FORWARDED_BODY_SIZE;
use futures_util::future::BoxFuture;
use http::header::{ACCEPT_ENCODING, CONNECTION, HOST, TRANSFER_ENCODING};
use http::{Request, Response, StatusCode, Uri};
use std::convert::Infallible;
use std::task::{Context, Poll};
use thiserror::Error;
use tower::Service;
use url::Url;

pub mod consts;
#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to read the request body: {0}")]
    RequestBody(#[from] axum::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct UpstreamService {
    client: reqwest::Client,
    upstream_url: Url,
}

impl UpstreamService {
    pub fn new(args: &Args) -> Result<Self, reqwest::Error> {
        // Redirects are the caller's business, so they are passed back as they are.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            upstream_url: args.upstream_url.clone(),
        })
    }
}

/// Puts the request's path and query on the upstream origin. The request can never pick the host.
pub fn target_url(upstream_url: &Url, uri: &Uri) -> Url {
    let mut target = upstream_url.clone();
    target.set_path(uri.path());
    target.set_query(uri.query());
    target
}

impl Service<Request<Body>> for UpstreamService {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let client = self.client.clone();
        let upstream_url = self.upstream_url.clone();
        Box::pin(async move {
            Ok(forward(client, &upstream_url, request)
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!("Failed to proxy a request upstream: {err}");
                    let mut response = Response::new(Body::empty());
                    *response.status_mut() = StatusCode::BAD_GATEWAY;
                    response
                }))
        })
    }
}

async fn forward(
    client: reqwest::Client,
    upstream_url: &Url,
    request: Request<Body>,
) -> Result<Response<Body>, ProxyError> {
    let target = target_url(upstream_url, request.uri());
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, MAX_FORWARDED_BODY_SIZE).await?;
    let mut headers = parts.headers;
    headers.remove(HOST);
    // Ask for an identity-encoded body so that it can be read on the way back.
    headers.remove(ACCEPT_ENCODING);

    let upstream_response = client
        .request(parts.method, target)
        .headers(headers)
        .body(body)
        .send()
        .await?;
    let status = upstream_response.status();
    let mut response_headers = upstream_response.headers().clone();
    response_headers.remove(CONNECTION);
    response_headers.remove(TRANSFER_ENCODING);
    let bytes = upstream_response.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
