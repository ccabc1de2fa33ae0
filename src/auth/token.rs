//! # Access Token Codec
//!
//! Structural decoding of the bearer credential issued by the backend.
//!
//! ## Design principles
//! - No dependency on `std::env`, no global state
//! - **No local signature verification**: the backend signs and verifies
//!   its own tokens; this front end only reads the claims it needs to
//!   drive the session flow. A forged token gets the holder nothing,
//!   since every data-bearing call is re-verified by the backend.
//! - Expiry is checked separately via [`is_expired`] against an injected
//!   clock, so "malformed" and "expired" stay distinguishable.
//!
//! ## Provided functions
//! - [`decode`] — structurally decode a token into [`TokenClaims`]
//! - [`is_expired`] — expiry check, failing closed on a missing claim

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Claims embedded in the backend-issued access token.
///
/// `username`, `band_name` and `role` are snapshots taken at issuing time;
/// the live values come from the enrichment fetch, never from here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Backend user id.
    pub user_id: i64,
    /// Expiration timestamp (UTC, seconds since UNIX epoch). A missing
    /// claim decodes as `0` and is therefore always expired.
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub band_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Structurally decodes an access token into [`TokenClaims`].
///
/// Succeeds for any well-formed token regardless of signature or expiry;
/// fails with [`DecodeError`] on malformed structure or unexpected field
/// types. Expiry is deliberately left to [`is_expired`].
pub fn decode(token: &str) -> Result<TokenClaims, DecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )
    .map_err(DecodeError)?;

    Ok(data.claims)
}

/// Returns `true` iff the claims are expired at `now`.
///
/// A missing or zero `exp` counts as expired (fail closed).
pub fn is_expired(claims: &TokenClaims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

/// Encodes claims into a token string for tests.
#[cfg(test)]
pub(crate) fn encode_for_tests(claims: &TokenClaims) -> String {
    use jsonwebtoken::{EncodingKey, Header};

    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"test-signing-secret"),
    )
    .expect("test token encoding")
}

#[cfg(test)]
pub(crate) fn claims_for_tests(user_id: i64, exp: i64) -> TokenClaims {
    TokenClaims {
        user_id,
        exp,
        username: None,
        band_name: None,
        role: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn decode_roundtrip_preserves_claims() {
        let claims = TokenClaims {
            user_id: 42,
            exp: 2_000_000_000,
            username: Some("alice".into()),
            band_name: Some("Bandname".into()),
            role: Some("admin".into()),
        };
        let token = encode_for_tests(&claims);

        let decoded = decode(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn decode_ignores_the_signature() {
        // Same payload signed with a different key still decodes: this
        // layer is structural only.
        let claims = claims_for_tests(7, 2_000_000_000);
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();

        assert_eq!(decode(&token).unwrap().user_id, 7);
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(decode("not-a-valid-token").is_err());
        assert!(decode("").is_err());
        assert!(decode("a.b").is_err());
    }

    #[test]
    fn missing_exp_decodes_and_counts_as_expired() {
        // Hand-build a payload without an exp claim.
        #[derive(serde::Serialize)]
        struct Bare {
            user_id: i64,
        }
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &Bare { user_id: 1 },
            &jsonwebtoken::EncodingKey::from_secret(b"k"),
        )
        .unwrap();

        let claims = decode(&token).unwrap();
        assert_eq!(claims.exp, 0);
        assert!(is_expired(&claims, at(1)));
    }

    #[test]
    fn non_numeric_user_id_is_rejected() {
        #[derive(serde::Serialize)]
        struct Wrong {
            user_id: String,
            exp: i64,
        }
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &Wrong {
                user_id: "not-a-number".into(),
                exp: 2_000_000_000,
            },
            &jsonwebtoken::EncodingKey::from_secret(b"k"),
        )
        .unwrap();

        assert!(decode(&token).is_err());
    }

    #[test]
    fn expiry_boundary_is_fail_closed() {
        let claims = claims_for_tests(1, 1000);

        assert!(is_expired(&claims, at(1000)), "exp == now counts as expired");
        assert!(is_expired(&claims, at(1001)));
        assert!(!is_expired(&claims, at(999)));
    }
}
