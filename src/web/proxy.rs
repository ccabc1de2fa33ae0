//! # API Reverse Proxy
//!
//! Forwards any request under `/api/` to the backend with the prefix
//! replaced by the configured base URL, so browser-side code and page
//! loads can talk to the backend without knowing where it lives.
//!
//! The proxy injects (overwriting anything the client sent) the bearer
//! token and the active band header from the request context, forwards
//! the body for non-read methods, and relays the backend response
//! verbatim. An unreachable backend maps to a synthetic `502`; nothing is
//! retried.

use axum::{
    body::Body,
    extract::{Extension, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::BAND_ID_HEADER;
use crate::error::ProxyUpstreamError;
use crate::web::{AppState, RequestContext};

/// Path prefix reserved for proxied backend calls.
pub const PROXY_PREFIX: &str = "/api";

const UPSTREAM_ERROR_BODY: &str = "Could not connect to the backend API.";

/// Headers that must not be forwarded in either direction.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Joins the proxied path (prefix stripped, query preserved) onto the
/// backend base URL.
pub fn upstream_url(base_url: &str, path_and_query: &str) -> String {
    let rest = path_and_query
        .strip_prefix(PROXY_PREFIX)
        .unwrap_or(path_and_query);
    format!("{base_url}{rest}")
}

/// Builds the header set for the upstream call: the client's headers
/// minus connection-level ones, with `Authorization` and `X-Band-ID`
/// injected from the request context (overwriting client values).
pub fn forward_headers(incoming: &HeaderMap, ctx: &RequestContext) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in incoming {
        if is_hop_by_hop(name)
            || name == header::HOST
            || name == header::CONTENT_LENGTH
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if let Some(token) = &ctx.token {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(header::AUTHORIZATION, value);
        }
    }
    if let Some(band_id) = ctx.active_band_id {
        if let Ok(value) = HeaderValue::from_str(&band_id.to_string()) {
            headers.insert(HeaderName::from_static("x-band-id"), value);
        }
    }

    headers
}

/// Handler for every method under `/api/{*path}`.
pub async fn proxy(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());
    let url = upstream_url(&state.config.api.base_url, path_and_query);
    let headers = forward_headers(&parts.headers, &ctx);

    // Read-only methods are forwarded without a body.
    let body_bytes = if parts.method == Method::GET || parts.method == Method::HEAD {
        None
    } else {
        match axum::body::to_bytes(body, state.config.http.max_body_bytes).await {
            Ok(bytes) => Some(bytes),
            Err(_) => {
                return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.")
                    .into_response();
            }
        }
    };

    let mut upstream_request = state.http.request(parts.method, &url).headers(headers);
    if let Some(bytes) = body_bytes {
        upstream_request = upstream_request.body(bytes);
    }

    match upstream_request.send().await {
        Ok(upstream) => relay(upstream).await,
        Err(err) => {
            warn!(error = %ProxyUpstreamError(err), url, "proxy upstream call failed");
            (StatusCode::BAD_GATEWAY, UPSTREAM_ERROR_BODY).into_response()
        }
    }
}

/// Relays the backend response (status, headers, body) to the caller.
async fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %ProxyUpstreamError(err), "reading upstream body failed");
            return (StatusCode::BAD_GATEWAY, UPSTREAM_ERROR_BODY).into_response();
        }
    };

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    for (name, value) in &headers {
        // The body was buffered, so the content-length is recomputed.
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        response.headers_mut().append(name.clone(), value.clone());
    }
    response
}
