//! Core domain entities.
//!
//! - [`Contact`] - A stored contact record
//! - [`NewContact`] - Input for creating a contact
//! - [`ContactPatch`] - Partial update of an existing contact
//! - [`AvatarUpload`] - An avatar image received from a client, not yet stored

pub mod avatar;
pub mod contact;

pub use avatar::AvatarUpload;
pub use contact::{Contact, ContactPatch, NewContact};
