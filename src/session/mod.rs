//! # Session Store Accessor
//!
//! The session lives entirely client-side, as four scoped cookies carried
//! on every request:
//!
//! | Cookie | Content |
//! |--------|---------|
//! | `jwt_token` | access token (bearer credential) |
//! | `refresh_token` | longer-lived credential for minting new access tokens |
//! | `active_band_id` | integer id of the band the user is scoped to |
//! | `user_bands` | JSON array of `{id, name}` memberships for the switcher |
//!
//! All four share the transport attributes from [`SessionConfig`]:
//! `HttpOnly`, `SameSite=Lax`, `Path=/`, `Secure` in production, bounded
//! max-age (7 days; 30 for the refresh token).
//!
//! Reads never fail: an unset or malformed slot reads as absent, and a
//! malformed `user_bands` value reads as an empty list. Writes during a
//! token refresh go through [`write_tokens`] so both token slots change
//! together; a partial pair is never observable downstream.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::types::{AuthSession, BandMembership, TokenPair};
use crate::config::SessionConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "jwt_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const ACTIVE_BAND_COOKIE: &str = "active_band_id";
pub const USER_BANDS_COOKIE: &str = "user_bands";

/// The four logical session slots, as read from a request's cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub active_band_id: Option<i64>,
    /// Cached band memberships; empty when unset or malformed.
    pub bands: Vec<BandMembership>,
}

/// Reads the session record from the cookie jar. Never fails; malformed
/// slots read as absent. An empty token value (as left behind by a
/// removal cookie) is not a credential and also reads as absent.
pub fn read_session(jar: &CookieJar) -> SessionRecord {
    let access_token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    let active_band_id = jar
        .get(ACTIVE_BAND_COOKIE)
        .and_then(|c| c.value().trim().parse::<i64>().ok());
    let bands = jar
        .get(USER_BANDS_COOKIE)
        .and_then(|c| serde_json::from_str::<Vec<BandMembership>>(c.value()).ok())
        .unwrap_or_default();

    SessionRecord {
        access_token,
        refresh_token,
        active_band_id,
        bands,
    }
}

fn session_cookie(
    cfg: &SessionConfig,
    name: &'static str,
    value: String,
    max_age_days: u32,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(cfg.cookie_secure)
        .http_only(true)
        .max_age(time::Duration::days(i64::from(max_age_days)))
        .build()
}

/// Writes a freshly exchanged token pair into both token slots.
///
/// Called after a successful refresh; both cookies are replaced in the
/// same response so readers never observe a partial pair.
pub fn write_tokens(jar: CookieJar, cfg: &SessionConfig, pair: &TokenPair) -> CookieJar {
    jar.add(session_cookie(
        cfg,
        ACCESS_TOKEN_COOKIE,
        pair.access_token.clone(),
        cfg.max_age_days,
    ))
    .add(session_cookie(
        cfg,
        REFRESH_TOKEN_COOKIE,
        pair.refresh_token.clone(),
        cfg.refresh_max_age_days,
    ))
}

/// Creates the session record at login/signup time.
///
/// The first returned band becomes the active one; when the backend
/// returns no bands the band slots are left unset, and when it returns no
/// refresh token that slot is left unset.
pub fn write_auth_session(jar: CookieJar, cfg: &SessionConfig, session: &AuthSession) -> CookieJar {
    let mut jar = jar.add(session_cookie(
        cfg,
        ACCESS_TOKEN_COOKIE,
        session.token.clone(),
        cfg.max_age_days,
    ));

    if let Some(refresh) = &session.refresh_token {
        jar = jar.add(session_cookie(
            cfg,
            REFRESH_TOKEN_COOKIE,
            refresh.clone(),
            cfg.refresh_max_age_days,
        ));
    }

    if let Some(first) = session.bands.first() {
        let listing =
            serde_json::to_string(&session.bands).unwrap_or_else(|_| "[]".to_string());
        jar = jar
            .add(session_cookie(cfg, USER_BANDS_COOKIE, listing, cfg.max_age_days))
            .add(session_cookie(
                cfg,
                ACTIVE_BAND_COOKIE,
                first.id.to_string(),
                cfg.max_age_days,
            ));
    }

    jar
}

/// Rewrites the active band slot; used by the band switcher.
pub fn write_active_band(jar: CookieJar, cfg: &SessionConfig, band_id: i64) -> CookieJar {
    jar.add(session_cookie(
        cfg,
        ACTIVE_BAND_COOKIE,
        band_id.to_string(),
        cfg.max_age_days,
    ))
}

/// Destroys the session: all four slots are cleared together.
///
/// Each slot gets an expired removal cookie whether or not the request
/// carried it, so a partial session (some slots already missing) is
/// still wiped in full on the client.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let removal = |name: &'static str| {
        let mut cookie = Cookie::build((name, "")).path("/").build();
        cookie.make_removal();
        cookie
    };

    jar.add(removal(ACCESS_TOKEN_COOKIE))
        .add(removal(REFRESH_TOKEN_COOKIE))
        .add(removal(ACTIVE_BAND_COOKIE))
        .add(removal(USER_BANDS_COOKIE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SessionConfig {
        SessionConfig {
            cookie_secure: true,
            max_age_days: 7,
            refresh_max_age_days: 30,
        }
    }

    fn full_session() -> AuthSession {
        AuthSession {
            token: "at1".into(),
            refresh_token: Some("rt1".into()),
            bands: vec![
                BandMembership { id: 5, name: "Bandname".into() },
                BandMembership { id: 9, name: "Side Project".into() },
            ],
        }
    }

    #[test]
    fn empty_jar_reads_as_empty_record() {
        let record = read_session(&CookieJar::new());
        assert_eq!(record, SessionRecord::default());
    }

    #[test]
    fn auth_session_roundtrips_through_the_jar() {
        let jar = write_auth_session(CookieJar::new(), &cfg(), &full_session());
        let record = read_session(&jar);

        assert_eq!(record.access_token.as_deref(), Some("at1"));
        assert_eq!(record.refresh_token.as_deref(), Some("rt1"));
        assert_eq!(record.active_band_id, Some(5));
        assert_eq!(record.bands.len(), 2);
        assert_eq!(record.bands[0].name, "Bandname");
    }

    #[test]
    fn session_without_bands_leaves_band_slots_unset() {
        let session = AuthSession {
            token: "at1".into(),
            refresh_token: None,
            bands: vec![],
        };
        let jar = write_auth_session(CookieJar::new(), &cfg(), &session);
        let record = read_session(&jar);

        assert_eq!(record.access_token.as_deref(), Some("at1"));
        assert!(record.refresh_token.is_none());
        assert!(record.active_band_id.is_none());
        assert!(record.bands.is_empty());
    }

    #[test]
    fn malformed_band_list_reads_as_empty() {
        let jar = CookieJar::new().add(Cookie::new(USER_BANDS_COOKIE, "{not json"));
        assert!(read_session(&jar).bands.is_empty());
    }

    #[test]
    fn malformed_active_band_reads_as_absent() {
        let jar = CookieJar::new().add(Cookie::new(ACTIVE_BAND_COOKIE, "abc"));
        assert!(read_session(&jar).active_band_id.is_none());
    }

    #[test]
    fn token_write_replaces_both_slots() {
        let jar = write_auth_session(CookieJar::new(), &cfg(), &full_session());
        let pair = TokenPair {
            access_token: "at2".into(),
            refresh_token: "rt2".into(),
        };
        let jar = write_tokens(jar, &cfg(), &pair);
        let record = read_session(&jar);

        assert_eq!(record.access_token.as_deref(), Some("at2"));
        assert_eq!(record.refresh_token.as_deref(), Some("rt2"));
        // Untouched slots keep their values.
        assert_eq!(record.active_band_id, Some(5));
    }

    #[test]
    fn cookies_carry_the_documented_attributes() {
        let jar = write_auth_session(CookieJar::new(), &cfg(), &full_session());

        let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.max_age(), Some(time::Duration::days(7)));

        let refresh = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
        assert_eq!(refresh.max_age(), Some(time::Duration::days(30)));
    }

    #[test]
    fn insecure_policy_drops_the_secure_flag() {
        let insecure = SessionConfig { cookie_secure: false, ..cfg() };
        let jar = write_auth_session(CookieJar::new(), &insecure, &full_session());

        assert_eq!(jar.get(ACCESS_TOKEN_COOKIE).unwrap().secure(), Some(false));
    }

    #[test]
    fn switching_band_rewrites_only_that_slot() {
        let jar = write_auth_session(CookieJar::new(), &cfg(), &full_session());
        let jar = write_active_band(jar, &cfg(), 9);
        let record = read_session(&jar);

        assert_eq!(record.active_band_id, Some(9));
        assert_eq!(record.access_token.as_deref(), Some("at1"));
    }

    #[test]
    fn clearing_removes_all_four_slots() {
        let jar = write_auth_session(CookieJar::new(), &cfg(), &full_session());
        let jar = clear_session(jar);

        assert_eq!(read_session(&jar), SessionRecord::default());
        for name in [
            ACCESS_TOKEN_COOKIE,
            REFRESH_TOKEN_COOKIE,
            ACTIVE_BAND_COOKIE,
            USER_BANDS_COOKIE,
        ] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "", "{name} should be emptied");
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        }
    }

    #[test]
    fn clearing_expires_slots_the_request_never_carried() {
        // A request with only the token cookies must still get removal
        // cookies for the band slots.
        let jar = CookieJar::new()
            .add(Cookie::new(ACCESS_TOKEN_COOKIE, "at1"))
            .add(Cookie::new(REFRESH_TOKEN_COOKIE, "rt1"));
        let jar = clear_session(jar);

        for name in [
            ACCESS_TOKEN_COOKIE,
            REFRESH_TOKEN_COOKIE,
            ACTIVE_BAND_COOKIE,
            USER_BANDS_COOKIE,
        ] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "", "{name} should be emptied");
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        }
        assert_eq!(read_session(&jar), SessionRecord::default());
    }
}
