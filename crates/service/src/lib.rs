//! Blind pastebin server for veilbin.
//!
//! This crate provides the server side of the protocol:
//! - Database (SQLite site + record store)
//! - Session store (in-memory handshake sessions with TTL eviction)
//! - State management (State bundling database + sessions)
//! - HTTP handlers (handshake, verify, store, retrieve, update, delete,
//!   register)
//!
//! The server never holds a site's secret. It verifies identity against a
//! stored fingerprint and persists ciphertext it cannot decrypt.

pub mod config;
pub mod database;
pub mod http;
pub mod session;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use database::{Database, DatabaseSetupError};
pub use state::{State as ServiceState, StateSetupError};
