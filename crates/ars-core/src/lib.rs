//! ars-core
//!
//! Pure domain types, cache-key conventions, and phone normalization.
//! No I/O; this is the shared vocabulary of the ARS system.

pub mod cache_keys;
pub mod error;
pub mod models;
pub mod phone;
