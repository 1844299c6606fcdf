//! HTTP API
//!
//! | Route        | Method | Auth |
//! |--------------|--------|------|
//! | `/`          | GET    | no   |
//! | `/health`    | GET    | no   |
//! | `/languages` | GET    | yes  |
//! | `/upload`    | POST   | yes  |
//! | `/query`     | POST   | yes  |
//!
//! Authentication only applies when `server.api_keys` is non-empty.

pub mod auth;
pub mod handlers;
pub mod routes;
#[allow(clippy::module_inception)]
pub mod server;
pub mod types;

pub use server::{build_app, HttpServer};
