//! Contact entity and its creation/update inputs.

use serde::{Deserialize, Serialize};

/// A person record stored in the contact book.
///
/// Serializable so a copy can be kept in the read-through cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub favorite: bool,
    pub avatar: Option<String>,
}

impl Contact {
    /// Creates a contact with only the required fields set.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            address: None,
            phone: None,
            favorite: false,
            avatar: None,
        }
    }
}

/// Input data for creating a new contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub favorite: bool,
    pub avatar: Option<String>,
}

/// Partial update for an existing contact.
///
/// `None` fields are left unchanged. For nullable columns,
/// `Some(None)` clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub favorite: Option<bool>,
    pub avatar: Option<Option<String>>,
}

impl ContactPatch {
    /// Returns true if applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.favorite.is_none()
            && self.avatar.is_none()
    }

    /// Applies the patch to a contact in place.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(address) = &self.address {
            contact.address = address.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
        if let Some(favorite) = self.favorite {
            contact.favorite = favorite;
        }
        if let Some(avatar) = &self.avatar {
            contact.avatar = avatar.clone();
        }
    }
}
