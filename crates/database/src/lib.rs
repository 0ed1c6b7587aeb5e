//! # POS Database Crate
//!
//! The MySQL adapter for the point-of-sale backend. It hides all SQL behind
//! the [`PosStore`] trait so the HTTP layer never sees a connection.
//!
//! ## Architectural Principles
//!
//! - **Connection per request:** there is no pool. Every operation asks the
//!   [`ConnectionProvider`] for a fresh TLS connection, uses it, and releases it
//!   on every exit path.
//! - **Explicit transactions:** auto-commit is switched off. A purchase writes
//!   its header and detail rows in one transaction that is either committed or
//!   rolled back as a whole.
//! - **Late configuration checks:** missing settings are reported when a
//!   connection is requested, so the server can start (and answer health
//!   checks) without a database.
//!
//! ## Public API
//!
//! - `ConnectionProvider`: validates settings and opens `ScopedConnection`s.
//! - `run_migrations`: applies the schema in `migrations/`.
//! - `PosStore` / `DbRepository`: product lookup and transaction persistence.
//! - `DbError`: the error type for everything above.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{run_migrations, ConnectionProvider, ScopedConnection, CONNECT_TIMEOUT};
pub use error::DbError;
pub use repository::{DbRepository, PosStore};
