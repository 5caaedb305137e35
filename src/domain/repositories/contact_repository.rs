//! Repository trait for contact data access.

use crate::domain::entities::{Contact, ContactPatch, NewContact};
use crate::error::AppError;
use async_trait::async_trait;

/// Filter applied when listing contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Only contacts whose `favorite` flag equals this value.
    pub favorite: Option<bool>,
    /// Case-insensitive substring of the contact name.
    pub name: Option<String>,
}

impl ContactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorite(mut self, favorite: Option<bool>) -> Self {
        self.favorite = favorite;
        self
    }

    /// Sets the name filter. Blank strings disable it.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    /// Returns true if the contact satisfies every criterion of the filter.
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(favorite) = self.favorite
            && contact.favorite != favorite
        {
            return false;
        }

        if let Some(name) = &self.name
            && !contact.name.to_lowercase().contains(&name.to_lowercase())
        {
            return false;
        }

        true
    }
}

/// Repository interface for managing contacts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgContactRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_contact.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Inserts a new contact and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_contact: NewContact) -> Result<Contact, AppError>;

    /// Finds a contact by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, AppError>;

    /// Lists contacts matching the filter, ordered by id.
    ///
    /// # Arguments
    ///
    /// - `filter` - Favorite and name criteria
    /// - `offset` - Number of matching rows to skip
    /// - `limit` - Maximum number of rows to return
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError>;

    /// Counts contacts matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: ContactFilter) -> Result<i64, AppError>;

    /// Applies a partial update.
    ///
    /// Returns `Ok(None)` if no contact has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: ContactPatch) -> Result<Option<Contact>, AppError>;

    /// Deletes a contact and returns the deleted row, or `None` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<Option<Contact>, AppError>;

    /// Deletes every contact and returns the deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_all(&self) -> Result<Vec<Contact>, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
