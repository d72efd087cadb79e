//! # ops-api
//!
//! Authenticated client for the Opsdeck REST backend.
//!
//! Every call goes through [`ApiClient::request`]: it snapshots the session,
//! attaches `Authorization: Bearer <token>` (when present) and the
//! organization scope header (always, `""` when unset), and on a
//! `401` whose message mentions an expired session refreshes the token once
//! and re-issues the request once. Typed endpoint methods validate decoded
//! payloads against the `ops-schema` registry before deserializing them.

mod auth;
pub mod bootstrap;
mod client;
mod cookies;
mod decode;
mod error;
mod forms;
mod organizations;
mod refresh;
mod submissions;

pub use bootstrap::SessionStatus;
pub use client::{ApiClient, ApiRequest, HttpMethod};
pub use error::ApiError;
