//! Request handlers.
//!
//! Admin submodules provide async CRUD handlers (list, get, create, update,
//! delete) for a single model. Handlers delegate to the repositories in
//! `catalog_db` and map errors via [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod categories;
pub mod products;
pub mod search;
pub mod tags;
