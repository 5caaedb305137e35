//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgContactRepository`] - Contact storage, filtering, and pagination

pub mod pg_contact_repository;

pub use pg_contact_repository::PgContactRepository;
