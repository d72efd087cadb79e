//! # ops-schema
//!
//! JSON Schema generation and validation for backend responses.
//!
//! Wire types are defined in `ops-core` with `#[derive(JsonSchema)]`. This
//! crate compiles one schema per response shape into a [`SchemaRegistry`] so
//! `ops-api` can reject malformed payloads generically instead of hand-rolling
//! a predicate per endpoint.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{SchemaRegistry, names};
