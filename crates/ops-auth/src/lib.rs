//! # ops-auth
//!
//! Session credentials for the Opsdeck API client.
//!
//! Provides durable storage for the access token (OS keychain via `keyring`,
//! with env and file fallbacks) and the active organization scope, the
//! in-process [`Session`] holder that request building snapshots, and the
//! loopback browser login flow (`tiny_http` + `open`) that captures the
//! authorization code.

pub mod browser_flow;
pub mod error;
pub mod session;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use session::{Credentials, Session};
pub use store::{DurableStore, MemoryStore, SessionStore, TokenSource};
