//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in the initial
//! migration.

/// Full access to the admin interface, including writes.
pub const ROLE_ADMIN: &str = "admin";

/// Read-only access to the admin interface.
pub const ROLE_STAFF: &str = "staff";
