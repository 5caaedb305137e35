//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization and validator for input
//! validation. Schemas are exported to the OpenAPI document via utoipa.

pub mod contact;
pub mod envelope;
pub mod health;
pub mod pagination;

pub use contact::{ContactData, ContactFormFields, ContactItem, ContactListData};
pub use envelope::ApiResponse;
pub use pagination::{ContactQueryParams, PaginationMetadata};
