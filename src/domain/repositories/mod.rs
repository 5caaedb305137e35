//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.

pub mod contact_repository;

pub use contact_repository::{ContactFilter, ContactRepository};

#[cfg(test)]
pub use contact_repository::MockContactRepository;
