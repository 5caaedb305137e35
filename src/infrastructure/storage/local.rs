//! Local filesystem avatar storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::AvatarUpload;
use crate::domain::storage::AvatarStorage;
use crate::error::AppError;

const RANDOM_SUFFIX_LEN: usize = 12;

/// Stores avatars as flat files in a single directory.
///
/// Files are named `<unix-millis>-<random>.<ext>` and exposed under
/// `public_prefix`, which must match the path the directory is served from.
#[derive(Debug, Clone)]
pub struct LocalAvatarStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalAvatarStorage {
    /// Creates the storage, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the directory cannot be created.
    pub async fn new(
        root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::internal(
                "Failed to create avatar directory",
                json!({ "path": root.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        Ok(Self {
            root,
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a public avatar path back to a file inside the root directory.
    ///
    /// Returns `None` for paths outside the prefix or containing separators.
    fn resolve(&self, avatar: &str) -> Option<PathBuf> {
        let file_name = avatar
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;

        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name.starts_with('.')
        {
            return None;
        }

        Some(self.root.join(file_name))
    }
}

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect()
}

fn generate_file_name(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        random_suffix(),
        extension
    )
}

#[async_trait]
impl AvatarStorage for LocalAvatarStorage {
    async fn store(&self, upload: AvatarUpload) -> Result<String, AppError> {
        let image = upload.verify_image()?;

        let file_name = generate_file_name(image.extension);
        let path = self.root.join(&file_name);

        fs::write(&path, &upload.data).await?;
        debug!(path = %path.display(), mime = image.mime, bytes = upload.len(), "Stored avatar");

        Ok(format!("{}/{}", self.public_prefix, file_name))
    }

    async fn remove(&self, avatar: &str) -> Result<(), AppError> {
        let Some(path) = self.resolve(avatar) else {
            debug!(avatar, "Skipping removal of avatar outside storage");
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Removed avatar");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes and removes a hidden probe file in the root directory.
    async fn health_check(&self) -> bool {
        let probe = self.root.join(format!(".health-{}", random_suffix()));

        if let Err(e) = fs::write(&probe, b"ok").await {
            warn!(error = %e, path = %probe.display(), "Avatar storage is not writable");
            return false;
        }

        if let Err(e) = fs::remove_file(&probe).await {
            warn!(error = %e, path = %probe.display(), "Failed to remove storage probe");
            return false;
        }

        true
    }
}
