//! Domain building blocks for the product catalog.
//!
//! This crate has no I/O and no internal dependencies so it can be shared by
//! the repository layer, the HTTP layer, and any future tooling.

pub mod admin;
pub mod error;
pub mod price;
pub mod roles;
pub mod search;
pub mod slug;
pub mod types;
