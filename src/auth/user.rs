/// The fully hydrated, request-scoped representation of "who is making
/// this request, in which band, with what role".
///
/// # Overview
///
/// `ResolvedUser` is only ever built by combining a decoded, unexpired
/// access token with a successful `/user/info` enrichment fetch for the
/// active band. It is never constructed from token claims alone: the
/// human-readable fields can change server-side (band rename, role
/// change) without the token being reissued.
///
/// Downstream handlers receive it through the request context and must
/// treat its absence as "not fully authenticated" even when a raw token
/// is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedUser {
    /// Backend user id, taken from the token claims.
    pub id: i64,
    pub username: String,
    /// Display name of the band the user is currently scoped to.
    pub band_name: String,
    /// The user's role within the active band.
    pub role: String,
}
