//! Backend API access: typed wire structs and the [`BackendApi`] port
//! with its HTTP implementation.

pub mod client;
pub mod types;

pub use client::{BAND_ID_HEADER, BackendApi, HttpBackendApi};
pub use types::{AuthSession, BandMembership, TokenPair, UserInfo};
