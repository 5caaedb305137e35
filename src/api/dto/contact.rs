//! DTOs for the contact resource.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::pagination::PaginationMetadata;
use crate::domain::entities::{Contact, ContactPatch, NewContact};
use crate::error::AppError;

/// Digits, spaces and the usual phone punctuation.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9 +\-().]+$").unwrap());

/// Contact as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactItem {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Alice")]
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub favorite: bool,
    /// Public path of the avatar image, e.g. `/public/uploads/1700000000000-abc.png`.
    pub avatar: Option<String>,
}

impl From<Contact> for ContactItem {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            address: contact.address,
            phone: contact.phone,
            favorite: contact.favorite,
            avatar: contact.avatar,
        }
    }
}

/// `data` payload of single-contact responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactData {
    pub contact: ContactItem,
}

impl From<Contact> for ContactData {
    fn from(contact: Contact) -> Self {
        Self {
            contact: contact.into(),
        }
    }
}

/// `data` payload of the contact listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactListData {
    pub contacts: Vec<ContactItem>,
    pub metadata: PaginationMetadata,
}

/// Optional text fields that can be cleared by sending an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearableField {
    Email,
    Address,
    Phone,
}

/// Text fields of the contact multipart form.
///
/// Values are trimmed. Empty optional values are recorded in `cleared`
/// instead of being stored, so they never reach the validators.
#[derive(Debug, Default, Validate)]
pub struct ContactFormFields {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 3, max = 20, message = "Phone must be 3-20 characters"))]
    #[validate(regex(path = "*PHONE_REGEX", message = "Phone contains invalid characters"))]
    pub phone: Option<String>,

    pub favorite: Option<bool>,

    pub cleared: Vec<ClearableField>,
}

impl ContactFormFields {
    /// Converts the form into a new contact. Cleared fields stay unset.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is missing.
    pub fn into_new_contact(self) -> Result<NewContact, AppError> {
        let name = self.name.ok_or_else(|| {
            AppError::bad_request(
                "Name is required",
                json!({ "fields": { "name": ["Name is required"] } }),
            )
        })?;

        Ok(NewContact {
            name,
            email: self.email,
            address: self.address,
            phone: self.phone,
            favorite: self.favorite.unwrap_or(false),
            avatar: None,
        })
    }

    /// Converts the form into a partial update.
    pub fn into_patch(self) -> ContactPatch {
        let cleared = self.cleared;
        let field = |value: Option<String>, kind: ClearableField| match value {
            Some(v) => Some(Some(v)),
            None if cleared.contains(&kind) => Some(None),
            None => None,
        };

        ContactPatch {
            name: self.name,
            email: field(self.email, ClearableField::Email),
            address: field(self.address, ClearableField::Address),
            phone: field(self.phone, ClearableField::Phone),
            favorite: self.favorite,
            avatar: None,
        }
    }
}

/// Multipart body of create and update, for the OpenAPI document only.
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// `true/false`, `1/0`, `on/off` or `yes/no`.
    pub favorite: Option<String>,
    #[serde(rename = "avatarFile")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub avatar_file: Option<Vec<u8>>,
}
