//! # Server-Rendered Pages
//!
//! Askama templates and the page handlers for the authenticated shell
//! and the login/signup forms. Layout is deliberately minimal; all data
//! on the authenticated pages comes from the request context and the
//! cached band list, never from an extra backend round trip.

use askama::Template;
use axum::{
    body::Body,
    extract::Extension,
    http::{Response, StatusCode, header},
    response::{IntoResponse, Redirect, Response as AxumResponse},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::types::BandMembership;
use crate::auth::ResolvedUser;
use crate::session;
use crate::web::RequestContext;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: ResolvedUser,
    pub bands: Vec<BandMembership>,
    pub active_band_id: i64,
}

/// Renders an Askama template into a `text/html` response.
///
/// A render failure maps to a plain 500; template bugs are programmer
/// errors, not user errors.
pub fn render_template<T: Template>(template: T) -> AxumResponse {
    render_template_with_status(template, StatusCode::OK)
}

/// Renders a template with an explicit status code, used when re-rendering
/// a form with the backend's rejection status.
pub fn render_template_with_status<T: Template>(template: T, status: StatusCode) -> AxumResponse {
    match template.render() {
        Ok(html) => Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(html))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// `GET /login` — the login form. Already-authenticated users go home.
pub async fn login_page(Extension(ctx): Extension<RequestContext>) -> AxumResponse {
    if ctx.user.is_some() {
        return Redirect::to("/").into_response();
    }
    render_template(LoginTemplate { error: None })
}

/// `GET /signup` — the signup form.
pub async fn signup_page(Extension(ctx): Extension<RequestContext>) -> AxumResponse {
    if ctx.user.is_some() {
        return Redirect::to("/").into_response();
    }
    render_template(SignupTemplate { error: None })
}

/// `GET /` — the authenticated shell with the band switcher.
///
/// The route guard: without a fully resolved user this redirects to the
/// login entry point. The band list comes from the `user_bands` cookie,
/// so rendering the switcher costs no network round trip.
pub async fn dashboard(
    Extension(ctx): Extension<RequestContext>,
    jar: CookieJar,
) -> AxumResponse {
    let (Some(user), Some(active_band_id)) = (ctx.user, ctx.active_band_id) else {
        return Redirect::to("/login").into_response();
    };

    let bands = session::read_session(&jar).bands;

    render_template(DashboardTemplate {
        user,
        bands,
        active_band_id,
    })
}
