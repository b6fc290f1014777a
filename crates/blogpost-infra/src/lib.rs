//! # Blogpost Infrastructure
//!
//! Concrete implementations of the ports defined in `blogpost-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post store via SeaORM
//!
//! Without `postgres` only [`InMemoryPostRepository`] is built.

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
