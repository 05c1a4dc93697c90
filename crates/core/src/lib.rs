//! Domain logic for the planetary missions backend.
//!
//! Everything in this crate is pure: no database access, no HTTP. The `db`
//! crate persists the entities described here and the `api` crate exposes
//! them over HTTP.

pub mod entity;
pub mod error;
pub mod patch;
pub mod serialization;
pub mod types;
pub mod validation;
