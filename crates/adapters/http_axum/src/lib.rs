//! # devices-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api/v1/devices`
//! - Decode request bodies, query strings and path ids into service calls
//!   (driving adapter)
//! - Map every [`DevicesError`](devices_domain::error::DevicesError) variant
//!   onto a status code and a JSON error body
//! - Expose `/health` for process supervisors
//!
//! ## Dependency rule
//! Depends on `devices-app` (for port traits and services) and `devices-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
