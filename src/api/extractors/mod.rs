//! Request extractors that reject malformed input with [`crate::error::AppError`].

mod contact_form;
mod contact_id;
mod query;

pub use contact_form::ContactMultipart;
pub use contact_id::ContactId;
pub use query::ValidQuery;
