//! # Error Taxonomy
//!
//! Typed failures for the session-interception chain and the reverse
//! proxy. Every component boundary returns one of these instead of a
//! dynamic error, so callers can make the recovery decision the protocol
//! requires:
//!
//! - [`DecodeError`] — malformed access token; treated as expired (fail
//!   closed), never surfaced to the user directly.
//! - [`RefreshError`] — refresh exchange failed; the request proceeds
//!   unauthenticated and **no session entry is cleared**.
//! - [`EnrichmentError`] — profile fetch failed; the raw token stays set,
//!   the resolved user stays absent.
//! - [`ProxyUpstreamError`] — backend unreachable while proxying; surfaced
//!   as a 502 and not retried.
//! - [`AuthActionError`] — login/signup/logout call failed; rejections
//!   carry the backend's status and message for re-rendering the form.

use axum::http::StatusCode;
use thiserror::Error;

/// The access token string is not a well-formed credential.
///
/// Decoding is purely structural; signature verification is delegated to
/// the issuing backend, so this error only signals malformed input.
#[derive(Debug, Error)]
#[error("malformed access token")]
pub struct DecodeError(#[source] pub jsonwebtoken::errors::Error);

/// The refresh-token exchange did not produce a new token pair.
///
/// Callers fall back to an unauthenticated request and leave the stored
/// session entries untouched, so a transient backend outage does not log
/// the user out.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The exchange call never completed (connect failure, timeout).
    #[error("refresh exchange transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("refresh exchange rejected with status {0}")]
    Status(StatusCode),
    /// The backend answered 2xx but the body was not a token pair.
    #[error("malformed refresh response: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// The profile/role fetch for the active band did not succeed.
///
/// Callers keep the raw token in the request context and leave the
/// resolved user absent; the request itself is not failed.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The fetch never completed (connect failure, timeout).
    #[error("user info transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("user info rejected with status {0}")]
    Status(StatusCode),
    /// The backend answered 2xx but the body was not a profile document.
    #[error("malformed user info response: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// The backend could not be reached while forwarding a proxied request.
#[derive(Debug, Error)]
#[error("backend API unreachable: {0}")]
pub struct ProxyUpstreamError(#[source] pub reqwest::Error);

/// A login, signup or logout call against the backend failed.
#[derive(Debug, Error)]
pub enum AuthActionError {
    /// The call never completed (connect failure, timeout).
    #[error("backend call failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The backend rejected the action; `message` is its error text.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    /// The backend answered 2xx but the body did not parse.
    #[error("malformed backend response: {0}")]
    Malformed(#[source] reqwest::Error),
}
