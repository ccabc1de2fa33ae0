//! Access-token decoding and the resolved-user principal.

pub mod token;
pub mod user;

pub use token::{TokenClaims, decode, is_expired};
pub use user::ResolvedUser;
