//! Authentication and authorization extractors for the admin API.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role (catalog writes).
//! - [`rbac::RequireStaff`] -- Requires `staff` or `admin` (catalog reads).

pub mod auth;
pub mod rbac;
