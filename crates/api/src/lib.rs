//! Product catalog HTTP server library.
//!
//! Exposes config, state, error handling, routes and the HTML page renderer
//! so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
