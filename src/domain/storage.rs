//! Storage contract for avatar image files.

use crate::domain::entities::AvatarUpload;
use crate::error::AppError;
use async_trait::async_trait;

/// Stores avatar images and hands back the public path they are served from.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::LocalAvatarStorage`] - Local filesystem
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarStorage: Send + Sync {
    /// Writes the upload and returns its public path (e.g. `/public/uploads/abc.png`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the file type is not an allowed image.
    /// Returns [`AppError::Internal`] if the file cannot be written.
    async fn store(&self, upload: AvatarUpload) -> Result<String, AppError>;

    /// Removes a previously stored avatar by its public path.
    ///
    /// Paths that were not produced by this storage are ignored.
    /// Removing a file that no longer exists is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the file exists but cannot be removed.
    async fn remove(&self, avatar: &str) -> Result<(), AppError>;

    /// Checks whether the storage location is usable.
    async fn health_check(&self) -> bool;
}
