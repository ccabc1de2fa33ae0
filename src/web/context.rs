use crate::auth::ResolvedUser;

/// Per-request authentication context, populated by the session
/// interceptor and read-only for downstream handlers.
///
/// All three fields are independently possibly-absent:
///
/// - `user` is only set when the token decoded with a future expiry, an
///   active band was selected **and** the enrichment fetch succeeded.
/// - `token` is the raw bearer credential as carried by the request, or
///   the freshly refreshed one; it can be set while `user` is not
///   (enrichment failed, or no band selected). Route guards that only
///   need "holds a token" may check it, but anything touching profile
///   fields must check `user`.
/// - `active_band_id` mirrors the session slot.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user: Option<ResolvedUser>,
    pub token: Option<String>,
    pub active_band_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_fully_absent() {
        let ctx = RequestContext::default();

        assert!(ctx.user.is_none());
        assert!(ctx.token.is_none());
        assert!(ctx.active_band_id.is_none());
    }
}
