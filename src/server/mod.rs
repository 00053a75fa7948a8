//! Axum-based HTTP server exposing the `/metrics` endpoint.
//!
//! # Components
//!
//! - `handlers`: Implementation of the landing page and metrics endpoints.
//! - `routes`: The router configuration that ties everything together.

mod handlers;
mod routes;

pub use routes::create_router;
