//! Contact management service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{AvatarUpload, Contact, ContactPatch, NewContact};
use crate::domain::repositories::{ContactFilter, ContactRepository};
use crate::domain::storage::AvatarStorage;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service implementing the contact operations behind the HTTP handlers.
///
/// Coordinates three collaborators:
/// - the repository, which owns persistence
/// - avatar storage, whose files must follow the contact lifecycle
/// - the read-through cache for single-contact lookups
pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
    storage: Arc<dyn AvatarStorage>,
    cache: Arc<dyn CacheService>,
    /// Bumped after every committed update or delete, before invalidation.
    write_epoch: AtomicU64,
}

fn cache_key(id: i64) -> String {
    format!("contact:{id}")
}

fn contact_not_found(id: i64) -> AppError {
    AppError::not_found("Contact not found", json!({ "id": id }))
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        storage: Arc<dyn AvatarStorage>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            repository,
            storage,
            cache,
            write_epoch: AtomicU64::new(0),
        }
    }

    /// Lists one page of contacts matching the filter.
    ///
    /// Runs the page query and the count query concurrently.
    ///
    /// # Returns
    ///
    /// The contacts on the page and the total number of matching contacts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_contacts_by_filter(
        &self,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Contact>, i64), AppError> {
        tokio::try_join!(
            self.repository.list(filter.clone(), offset, limit),
            self.repository.count(filter)
        )
    }

    /// Creates a contact, storing its avatar first when one was uploaded.
    ///
    /// If persisting the contact fails, the freshly stored avatar is removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank or the avatar is not an image.
    /// Returns [`AppError::Internal`] on database or storage errors.
    pub async fn create_contact(
        &self,
        mut new_contact: NewContact,
        avatar: Option<AvatarUpload>,
    ) -> Result<Contact, AppError> {
        if new_contact.name.trim().is_empty() {
            return Err(AppError::bad_request(
                "Name can not be empty",
                json!({ "field": "name" }),
            ));
        }

        if let Some(upload) = avatar {
            new_contact.avatar = Some(self.storage.store(upload).await?);
        }

        let stored_avatar = new_contact.avatar.clone();

        match self.repository.create(new_contact).await {
            Ok(contact) => {
                metrics::counter!("contacts_created_total").increment(1);
                info!(id = contact.id, "Contact created");
                Ok(contact)
            }
            Err(e) => {
                if let Some(avatar) = stored_avatar {
                    self.discard_avatar(&avatar).await;
                }
                Err(e)
            }
        }
    }

    /// Retrieves a contact by id, consulting the cache first.
    ///
    /// A row read from the database is only left in the cache if no update or
    /// delete committed while it was being read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no contact has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_contact(&self, id: i64) -> Result<Contact, AppError> {
        let key = cache_key(id);

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str::<Contact>(&cached) {
                Ok(contact) => return Ok(contact),
                Err(e) => warn!(error = %e, key, "Discarding malformed cache entry"),
            }
        }

        let epoch = self.write_epoch.load(Ordering::SeqCst);

        let contact = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| contact_not_found(id))?;

        match serde_json::to_string(&contact) {
            Ok(serialized) => {
                if let Err(e) = self.cache.set(&key, &serialized, None).await {
                    warn!(error = ?e, key, "Failed to cache contact");
                }
            }
            Err(e) => warn!(error = %e, key, "Failed to serialize contact for cache"),
        }

        // A writer may have invalidated the key before our set landed.
        if self.write_epoch.load(Ordering::SeqCst) != epoch {
            debug!(key, "Contact changed during read, dropping cache entry");
            self.invalidate_key(&key).await;
        }

        Ok(contact)
    }

    /// Applies a partial update, replacing the avatar when a new one was uploaded.
    ///
    /// The contact's existence is checked before anything is written to avatar
    /// storage. The previous avatar file is removed only after the update commits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the update is empty or the name is blank.
    /// Returns [`AppError::NotFound`] if no contact has this id.
    /// Returns [`AppError::Internal`] on database or storage errors.
    pub async fn update_contact(
        &self,
        id: i64,
        mut patch: ContactPatch,
        avatar: Option<AvatarUpload>,
    ) -> Result<Contact, AppError> {
        if patch.is_empty() && avatar.is_none() {
            return Err(AppError::bad_request(
                "Data to update can not be empty",
                json!({}),
            ));
        }

        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::bad_request(
                "Name can not be empty",
                json!({ "field": "name" }),
            ));
        }

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| contact_not_found(id))?;

        let new_avatar = match avatar {
            Some(upload) => Some(self.storage.store(upload).await?),
            None => None,
        };
        if let Some(path) = &new_avatar {
            patch.avatar = Some(Some(path.clone()));
        }

        let updated = match self.repository.update(id, patch).await {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                if let Some(path) = &new_avatar {
                    self.discard_avatar(path).await;
                }
                return Err(contact_not_found(id));
            }
            Err(e) => {
                if let Some(path) = &new_avatar {
                    self.discard_avatar(path).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = &existing.avatar
            && updated.avatar.as_ref() != Some(old)
        {
            self.discard_avatar(old).await;
        }

        self.invalidate(id).await;
        metrics::counter!("contacts_updated_total").increment(1);
        info!(id, "Contact updated");

        Ok(updated)
    }

    /// Deletes a contact together with its avatar file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no contact has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_contact(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| contact_not_found(id))?;

        if let Some(avatar) = &deleted.avatar {
            self.discard_avatar(avatar).await;
        }

        self.invalidate(id).await;
        metrics::counter!("contacts_deleted_total").increment(1);
        info!(id, "Contact deleted");

        Ok(())
    }

    /// Deletes every contact and every avatar file they referenced.
    ///
    /// # Returns
    ///
    /// The number of contacts deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_all_contacts(&self) -> Result<usize, AppError> {
        let deleted = self.repository.delete_all().await?;

        for avatar in deleted.iter().filter_map(|c| c.avatar.as_deref()) {
            self.discard_avatar(avatar).await;
        }

        self.write_epoch.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.cache.clear().await {
            warn!(error = ?e, "Failed to clear contact cache");
        }

        metrics::counter!("contacts_deleted_total").increment(deleted.len() as u64);
        info!(count = deleted.len(), "All contacts deleted");

        Ok(deleted.len())
    }

    /// Checks that the contact store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database cannot be queried.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Removes an avatar file, logging instead of failing.
    async fn discard_avatar(&self, avatar: &str) {
        match self.storage.remove(avatar).await {
            Ok(()) => debug!(avatar, "Avatar discarded"),
            Err(e) => warn!(error = %e, avatar, "Failed to remove avatar file"),
        }
    }

    async fn invalidate(&self, id: i64) {
        self.write_epoch.fetch_add(1, Ordering::SeqCst);
        self.invalidate_key(&cache_key(id)).await;
    }

    async fn invalidate_key(&self, key: &str) {
        if let Err(e) = self.cache.invalidate(key).await {
            warn!(error = ?e, key, "Failed to invalidate contact cache");
        }
    }
}
