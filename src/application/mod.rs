//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! avatar storage, and caching. Services consume domain traits and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::contact_service::ContactService`] - Contact CRUD, filtering, and avatar lifecycle

pub mod services;
