//! # ops-core
//!
//! Domain types and error types shared across the Opsdeck crates.
//!
//! - Entity structs mirroring the backend's JSON shapes (forms, submissions,
//!   organization memberships, user profile)
//! - Response envelopes for the auth and listing endpoints
//! - Pagination parameters
//! - Cross-cutting error types
//!
//! Every type that the client reads off the wire derives [`schemars::JsonSchema`]
//! so `ops-schema` can validate raw payloads before they are deserialized.

pub mod entities;
pub mod errors;
pub mod pagination;
pub mod responses;

pub use errors::CoreError;
pub use pagination::Pagination;
