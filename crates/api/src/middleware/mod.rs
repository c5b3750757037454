//! Request extractors resolving the caller's identity.
//!
//! - [`auth::AuthUser`] -- requires a valid session token.
//! - [`auth::MaybeAuthUser`] -- the caller if authenticated, else anonymous.
//! - [`rbac::RequireAdmin`] -- requires a user whose row has `is_admin`.

pub mod auth;
pub mod rbac;
