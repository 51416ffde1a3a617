//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the PostgreSQL post store and the bearer-token
//! verifier.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM. Without it
//!   the API server falls back to its in-memory repository.

pub mod auth;
pub mod database;

pub use auth::JwtTokenService;
pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
