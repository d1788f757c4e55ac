//! # devices-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement
//!   (`DeviceRepository`, the persistence contract)
//! - Define the **driving port** as a use-case struct:
//!   `DeviceService`: create, get, list, update, partially update, delete
//! - Enforce state guards and validation before any write reaches a port
//!
//! ## Dependency rule
//! Depends on `devices-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod pagination;
pub mod ports;
pub mod services;
