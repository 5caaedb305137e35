//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ContactService;
use crate::domain::repositories::ContactRepository;
use crate::domain::storage::AvatarStorage;
use crate::infrastructure::cache::CacheService;

/// Default maximum avatar size in bytes (2 MiB).
pub const DEFAULT_AVATAR_MAX_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<ContactService>,
    pub avatar_storage: Arc<dyn AvatarStorage>,
    pub cache: Arc<dyn CacheService>,
    /// Largest avatar file accepted by the upload parser.
    pub avatar_max_bytes: usize,
}

impl AppState {
    /// Wires the contact service from its collaborators.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        avatar_storage: Arc<dyn AvatarStorage>,
        cache: Arc<dyn CacheService>,
        avatar_max_bytes: usize,
    ) -> Self {
        let contact_service = Arc::new(ContactService::new(
            repository,
            avatar_storage.clone(),
            cache.clone(),
        ));

        Self {
            contact_service,
            avatar_storage,
            cache,
            avatar_max_bytes,
        }
    }
}
