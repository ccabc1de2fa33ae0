//! # Session Interceptor
//!
//! Runs once per inbound request, before any page or route handler:
//!
//! 1. Read the four session slots from the request cookies.
//! 2. Decode the access token; a malformed token is treated exactly like
//!    an expired one.
//! 3. If the token is absent or expired and a refresh token exists,
//!    attempt **one** refresh exchange. On success the new pair is
//!    scheduled for the response cookies and the new access token is
//!    current for the rest of this request. On failure the request
//!    proceeds unauthenticated and the stored session is left untouched.
//! 4. If a current valid token and an active band exist, attempt **one**
//!    enrichment fetch. On success the resolved user is populated; on
//!    failure the raw token stays set and the user stays absent.
//! 5. Publish the resulting [`RequestContext`] in the request extensions.
//!
//! The logout route is the one designated bypass: it is short-circuited
//! before any decode/refresh/enrich logic so that tearing a session down
//! never depends on the backend being reachable.
//!
//! The only session-store writes in this chain happen after a successful
//! refresh, and both token slots are written in the same response.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::api::{BackendApi, types::TokenPair};
use crate::auth::{ResolvedUser, token};
use crate::session::{self, SessionRecord};
use crate::time::Clock;
use crate::web::{AppState, RequestContext};

/// The path that bypasses the interceptor entirely.
pub const LOGOUT_PATH: &str = "/logout";

/// What one run of the interceptor produced: the context for downstream
/// handlers, plus the token pair to persist when a refresh happened.
#[derive(Debug)]
pub struct SessionOutcome {
    pub context: RequestContext,
    /// `Some` only after a successful refresh; the caller writes both
    /// token slots from it.
    pub refreshed: Option<TokenPair>,
}

/// Runs the decode → refresh → enrich chain against a session record.
///
/// Performs at most one refresh call and at most one enrichment call;
/// neither is ever retried here. Session-store writes are left to the
/// caller so this stays side-effect free.
pub async fn resolve_session(
    api: &dyn BackendApi,
    clock: &dyn Clock,
    record: &SessionRecord,
) -> SessionOutcome {
    let now = clock.now();

    let mut context = RequestContext {
        user: None,
        token: record.access_token.clone(),
        active_band_id: record.active_band_id,
    };

    // A "current" credential is a token string plus claims that decoded
    // with a future expiry. Decode failure counts as expired.
    let mut current = record.access_token.as_deref().and_then(|raw| {
        let claims = token::decode(raw)
            .inspect_err(|err| debug!(error = %err, "access token failed to decode"))
            .ok()?;
        (!token::is_expired(&claims, now)).then(|| (raw.to_string(), claims))
    });

    let mut refreshed = None;
    if current.is_none() {
        if let Some(refresh_token) = record.refresh_token.as_deref() {
            match api.refresh(refresh_token).await {
                Ok(pair) => {
                    context.token = Some(pair.access_token.clone());
                    current = token::decode(&pair.access_token)
                        .ok()
                        .filter(|claims| !token::is_expired(claims, now))
                        .map(|claims| (pair.access_token.clone(), claims));
                    refreshed = Some(pair);
                }
                Err(err) => {
                    // Stored entries stay untouched; a later request can
                    // retry with the same refresh token.
                    warn!(error = %err, "token refresh failed, proceeding unauthenticated");
                }
            }
        }
    }

    if let (Some((access_token, claims)), Some(band_id)) = (&current, record.active_band_id) {
        match api.user_info(access_token, band_id).await {
            Ok(info) => {
                context.user = Some(ResolvedUser {
                    id: claims.user_id,
                    username: info.username,
                    band_name: info.band_name,
                    role: info.role,
                });
            }
            Err(err) => {
                // Authenticated but unenriched: the raw token stays in
                // the context, the resolved user stays absent.
                warn!(error = %err, band_id, "user enrichment failed");
            }
        }
    }

    SessionOutcome { context, refreshed }
}

/// Axum middleware wrapping [`resolve_session`].
///
/// Populates the request extensions with the [`RequestContext`] and, when
/// a refresh succeeded, attaches both rewritten token cookies to the
/// response.
pub async fn session_layer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == LOGOUT_PATH {
        return next.run(request).await;
    }

    let record = session::read_session(&jar);
    let outcome = resolve_session(state.api.as_ref(), state.clock.as_ref(), &record).await;

    request.extensions_mut().insert(outcome.context);
    let response = next.run(request).await;

    match outcome.refreshed {
        Some(pair) => {
            let jar = session::write_tokens(jar, &state.config.session, &pair);
            (jar, response).into_response()
        }
        None => response,
    }
}
