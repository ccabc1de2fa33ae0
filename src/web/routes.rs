//! # Router and Form Actions
//!
//! Wires the session interceptor around the page handlers, the auth
//! actions and the reverse proxy, and implements the form actions that
//! mutate the session: login, signup, logout and band switching.

use axum::{
    Form, Router, middleware,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{any, get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AuthActionError;
use crate::session;
use crate::web::pages::{self, LoginTemplate, SignupTemplate};
use crate::web::{AppState, interceptor, proxy};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(rename = "bandName")]
    pub band_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchBandForm {
    #[serde(rename = "bandId")]
    pub band_id: Option<i64>,
}

const BACKEND_DOWN_MESSAGE: &str = "Le serveur est momentanément indisponible.";

/// `POST /login` — authenticate and create the session record.
///
/// On success all four session slots are written and the user lands on
/// the dashboard; on rejection the form is re-rendered with the
/// backend's status and message.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.api.login(&form.username, &form.password).await {
        Ok(granted) => {
            let jar = session::write_auth_session(jar, &state.config.session, &granted);
            (jar, Redirect::to("/")).into_response()
        }
        Err(AuthActionError::Rejected { status, message }) => pages::render_template_with_status(
            LoginTemplate { error: Some(message) },
            status,
        ),
        Err(err) => {
            warn!(error = %err, "login call failed");
            pages::render_template_with_status(
                LoginTemplate {
                    error: Some(BACKEND_DOWN_MESSAGE.into()),
                },
                StatusCode::BAD_GATEWAY,
            )
        }
    }
}

/// `POST /signup` — create a user with their first band, then log in.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Response {
    match state
        .api
        .signup(&form.band_name, &form.username, &form.password)
        .await
    {
        Ok(granted) => {
            let jar = session::write_auth_session(jar, &state.config.session, &granted);
            (jar, Redirect::to("/")).into_response()
        }
        Err(AuthActionError::Rejected { status, message }) => pages::render_template_with_status(
            SignupTemplate { error: Some(message) },
            status,
        ),
        Err(err) => {
            warn!(error = %err, "signup call failed");
            pages::render_template_with_status(
                SignupTemplate {
                    error: Some(BACKEND_DOWN_MESSAGE.into()),
                },
                StatusCode::BAD_GATEWAY,
            )
        }
    }
}

/// `POST /logout` — destroy the session.
///
/// Clears all four slots, then revokes the refresh token server-side on
/// a best-effort basis. The route bypasses the session interceptor, so
/// logging out works even when the backend is down.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let record = session::read_session(&jar);
    let jar = session::clear_session(jar);

    if let (Some(access), Some(refresh)) = (record.access_token, record.refresh_token) {
        if let Err(err) = state.api.revoke(&access, &refresh).await {
            // The client-side session is already gone; the token will
            // age out server-side.
            debug!(error = %err, "refresh token revocation failed");
        }
    }

    (jar, Redirect::to("/login")).into_response()
}

/// `POST /switch-band` — rewrite the active band slot and go home.
pub async fn switch_band(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SwitchBandForm>,
) -> Response {
    let jar = match form.band_id {
        Some(band_id) => session::write_active_band(jar, &state.config.session, band_id),
        None => jar,
    };
    (jar, Redirect::to("/")).into_response()
}

async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

/// Assembles the full application router with the session interceptor
/// layered around every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/login", get(pages::login_page).post(login))
        .route("/signup", get(pages::signup_page).post(signup))
        .route("/logout", post(logout))
        .route("/switch-band", post(switch_band))
        .route("/api/{*path}", any(proxy::proxy))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            interceptor::session_layer,
        ))
        .with_state(state)
}
