#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use contacts_api::config::UPLOADS_PUBLIC_PATH;
use contacts_api::domain::entities::{Contact, ContactPatch, NewContact};
use contacts_api::domain::repositories::{ContactFilter, ContactRepository};
use contacts_api::error::AppError;
use contacts_api::infrastructure::cache::NullCache;
use contacts_api::infrastructure::storage::LocalAvatarStorage;
use contacts_api::routes::{RouterOptions, app_router};
use contacts_api::state::{AppState, DEFAULT_AVATAR_MAX_BYTES};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;
use tokio::sync::Mutex;

/// Contact repository backed by a map, for handler tests without PostgreSQL.
#[derive(Default)]
pub struct InMemoryContactRepository {
    store: Mutex<Store>,
    unavailable: AtomicBool,
}

#[derive(Default)]
struct Store {
    last_id: i64,
    contacts: BTreeMap<i64, Contact>,
}

impl InMemoryContactRepository {
    /// Makes every subsequent `ping` fail, simulating a lost database.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn matching<'a>(store: &'a Store, filter: &'a ContactFilter) -> impl Iterator<Item = &'a Contact> {
        store.contacts.values().filter(move |c| filter.matches(c))
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, new_contact: NewContact) -> Result<Contact, AppError> {
        let mut store = self.store.lock().await;
        store.last_id += 1;
        let contact = Contact {
            id: store.last_id,
            name: new_contact.name,
            email: new_contact.email,
            address: new_contact.address,
            phone: new_contact.phone,
            favorite: new_contact.favorite,
            avatar: new_contact.avatar,
        };
        store.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, AppError> {
        Ok(self.store.lock().await.contacts.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        let store = self.store.lock().await;
        Ok(Self::matching(&store, &filter)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: ContactFilter) -> Result<i64, AppError> {
        let store = self.store.lock().await;
        Ok(Self::matching(&store, &filter).count() as i64)
    }

    async fn update(&self, id: i64, patch: ContactPatch) -> Result<Option<Contact>, AppError> {
        let mut store = self.store.lock().await;
        Ok(store.contacts.get_mut(&id).map(|contact| {
            patch.apply_to(contact);
            contact.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Contact>, AppError> {
        Ok(self.store.lock().await.contacts.remove(&id))
    }

    async fn delete_all(&self) -> Result<Vec<Contact>, AppError> {
        let mut store = self.store.lock().await;
        Ok(std::mem::take(&mut store.contacts).into_values().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

/// Everything a handler test needs. The temp dir lives as long as the context.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<InMemoryContactRepository>,
    pub public_dir: TempDir,
}

impl TestContext {
    /// Directory avatar uploads land in.
    pub fn upload_dir(&self) -> PathBuf {
        self.public_dir.path().join("uploads")
    }

    /// Number of files currently in the upload directory.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Resolves a public avatar path to its file on disk.
    pub fn avatar_file(&self, avatar: &str) -> PathBuf {
        let name = avatar
            .strip_prefix(UPLOADS_PUBLIC_PATH)
            .unwrap()
            .trim_start_matches('/');
        self.upload_dir().join(name)
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            rate_limit_enabled: false,
            behind_proxy: false,
            public_dir: self.public_dir.path().to_path_buf(),
        }
    }
}

pub async fn create_test_context() -> TestContext {
    create_test_context_with_limit(DEFAULT_AVATAR_MAX_BYTES).await
}

pub async fn create_test_context_with_limit(avatar_max_bytes: usize) -> TestContext {
    let public_dir = tempfile::tempdir().unwrap();
    let storage = LocalAvatarStorage::new(public_dir.path().join("uploads"), UPLOADS_PUBLIC_PATH)
        .await
        .unwrap();
    let repo = Arc::new(InMemoryContactRepository::default());

    let state = AppState::new(
        repo.clone(),
        Arc::new(storage),
        Arc::new(NullCache::new()),
        avatar_max_bytes,
    );

    TestContext {
        state,
        repo,
        public_dir,
    }
}

/// Builds a test server over the full application router, rate limiting off.
pub fn make_server(ctx: &TestContext) -> TestServer {
    let app = app_router(ctx.state.clone(), &ctx.router_options());
    TestServer::new(app).unwrap()
}

pub async fn seed_contact(repo: &InMemoryContactRepository, name: &str, favorite: bool) -> Contact {
    repo.create(NewContact {
        name: name.to_string(),
        favorite,
        ..Default::default()
    })
    .await
    .unwrap()
}

/// A tiny valid GIF header followed by filler bytes.
pub fn gif_bytes() -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&[0u8; 32]);
    bytes
}

/// A tiny valid PNG header followed by filler bytes.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}
