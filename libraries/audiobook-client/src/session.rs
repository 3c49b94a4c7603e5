//! Process-wide authentication session.
//!
//! The logged-in user's profile (with role) is the only client-side state that
//! survives restarts. It is persisted as one JSON blob through a
//! [`SessionStore`] and published to observers through a single
//! `tokio::sync::watch` channel.

use crate::client::AudiobookClient;
use crate::error::{ClientError, Result};
use audiobook_core::{PasswordChange, ProfileUpdate, Registration, User};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// File name of the persisted session
pub const SESSION_FILE_NAME: &str = "userData.json";

/// Storage for the persisted session blob.
///
/// Implementations are synchronous: hydration happens before any screen
/// renders.
pub trait SessionStore: Send + Sync {
    /// Read the blob, `None` when nothing is stored.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the blob.
    fn save(&self, blob: &str) -> io::Result<()>;

    /// Remove the blob. Removing nothing is not an error.
    fn clear(&self) -> io::Result<()>;
}

/// Session blob stored in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store named [`SESSION_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SESSION_FILE_NAME))
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, blob: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    blob: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self
            .blob
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, blob: &str) -> io::Result<()> {
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Observable session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Logged-in user, with role
    pub user: Option<User>,
    /// True until the persisted blob has been read
    pub is_loading: bool,
}

impl SessionState {
    /// Whether a user is logged in
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the logged-in user is an admin
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// The authentication session shared by every screen.
pub struct AuthSession {
    store: Arc<dyn SessionStore>,
    state: watch::Sender<SessionState>,
}

impl AuthSession {
    /// Create an un-hydrated session (`is_loading` is true).
    pub fn new(store: impl SessionStore + 'static) -> Self {
        let (state, _) = watch::channel(SessionState {
            user: None,
            is_loading: true,
        });
        Self {
            store: Arc::new(store),
            state,
        }
    }

    /// Create a session and hydrate it immediately.
    pub fn hydrated(store: impl SessionStore + 'static) -> Self {
        let session = Self::new(store);
        session.hydrate();
        session
    }

    /// Read the persisted user.
    ///
    /// A blob that cannot be parsed is removed; the session is then logged out.
    pub fn hydrate(&self) {
        let user = match self.store.load() {
            Ok(Some(blob)) => match serde_json::from_str::<User>(&blob) {
                Ok(user) => {
                    debug!(username = %user.username, "Restored session");
                    Some(user)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable session data");
                    if let Err(e) = self.store.clear() {
                        warn!(error = %e, "Failed to remove unreadable session data");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session data");
                None
            }
        };

        self.state.send_replace(SessionState {
            user,
            is_loading: false,
        });
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current snapshot
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Logged-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Logged-in user, or `NotLoggedIn`
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(ClientError::NotLoggedIn)
    }

    /// Whether a user is logged in
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Whether the logged-in user is an admin
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// Whether hydration is still pending
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Check credentials, fetch the profile and persist it with the role.
    ///
    /// On any failure the session is left unset and nothing is persisted.
    pub async fn login(
        &self,
        client: &AudiobookClient,
        username: &str,
        password: &str,
    ) -> Result<User> {
        let role = client.users().login(username, password).await?;
        let mut user = client.users().get(username).await?;
        user.role = role;

        self.set_user(user.clone());
        info!(username = %user.username, admin = user.is_admin(), "Session started");
        Ok(user)
    }

    /// Create an account. Does not log in.
    pub async fn register(
        &self,
        client: &AudiobookClient,
        registration: &Registration,
    ) -> Result<String> {
        client.users().register(registration).await
    }

    /// Forget the user locally.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to remove session data");
        }
        self.state.send_replace(SessionState {
            user: None,
            is_loading: false,
        });
        info!("Logged out");
    }

    /// Re-fetch the profile, keeping the stored role.
    ///
    /// On failure the session is unchanged and the error is returned.
    pub async fn refresh_profile(&self, client: &AudiobookClient) -> Result<User> {
        let current = self.require_user()?;
        let mut user = client.users().get(&current.username).await?;
        user.role = current.role;

        self.set_user(user.clone());
        Ok(user)
    }

    /// Update the logged-in user's profile, then refresh it.
    pub async fn update_profile(
        &self,
        client: &AudiobookClient,
        update: &ProfileUpdate,
    ) -> Result<User> {
        let current = self.require_user()?;
        client
            .users()
            .update_profile(&current.username, update)
            .await?;
        self.refresh_profile(client).await
    }

    /// Change the logged-in user's password after local checks.
    pub async fn change_password(
        &self,
        client: &AudiobookClient,
        old_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<()> {
        let change = PasswordChange::new(old_password, new_password, confirmation)?;
        let current = self.require_user()?;
        client
            .users()
            .change_password(&current.username, &change)
            .await
    }

    fn set_user(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(blob) => {
                if let Err(e) = self.store.save(&blob) {
                    warn!(error = %e, "Failed to persist session; it will not survive a restart");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }

        self.state.send_replace(SessionState {
            user: Some(user),
            is_loading: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiobook_core::Role;

    fn user_blob() -> String {
        serde_json::json!({
            "username": "an",
            "fullname": "Nguyễn An",
            "email": "an@example.com",
            "phonenumber": "0900000000",
            "role": "ADMIN"
        })
        .to_string()
    }

    #[test]
    fn test_loading_until_hydrated() {
        let session = AuthSession::new(MemorySessionStore::new());
        assert!(session.is_loading());

        session.hydrate();
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_hydrate_restores_user() {
        let session = AuthSession::hydrated(MemorySessionStore::with_blob(user_blob()));
        let user = session.current_user().expect("restored");

        assert_eq!(user.username, "an");
        assert_eq!(user.role, Role::Admin);
        assert!(session.is_admin());
    }

    #[test]
    fn test_corrupt_blob_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        let session = AuthSession::hydrated(store.clone());

        assert!(!session.is_authenticated());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_logout_clears_store_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        store.save(&user_blob()).unwrap();

        let session = AuthSession::hydrated(store.clone());
        let rx = session.subscribe();
        assert!(rx.borrow().is_authenticated());

        session.logout();

        assert!(!rx.borrow().is_authenticated());
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join(SESSION_FILE_NAME));

        assert_eq!(store.load().unwrap(), None);
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_store_failures_stay_local() {
        // A directory where the session file should be: every store call fails
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.load().is_err());

        let session = AuthSession::hydrated(store);
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_require_user_when_logged_out() {
        let session = AuthSession::hydrated(MemorySessionStore::new());
        assert!(matches!(session.require_user(), Err(ClientError::NotLoggedIn)));
    }
}
