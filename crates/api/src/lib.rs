//! HTTP API for the quest learning platform.
//!
//! The binary in `main.rs` and the integration tests share everything here,
//! most importantly [`router::build_app_router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
