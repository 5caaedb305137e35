//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod contacts;
pub mod errors;
pub mod health;

pub use contacts::{
    create_contact, delete_all_contacts, delete_contact, get_contact, get_contacts_by_filter,
    update_contact,
};
pub use errors::{method_not_allowed, resource_not_found};
pub use health::health_handler;
