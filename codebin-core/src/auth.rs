//! Authentication state and durable token storage
//!
//! The bearer token is held as a [`SecretString`] and never logged.

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::api::SnippetApi;
use crate::error::StorageResult;
use crate::notification::{Notification, Notifier, messages};

/// Durable storage for the bearer token
pub trait TokenStore {
    /// Reads the stored token, if any
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backing storage cannot be read.
    fn load(&self) -> StorageResult<Option<SecretString>>;

    /// Replaces the stored token
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the token cannot be written.
    fn store(&self, token: &SecretString) -> StorageResult<()>;

    /// Removes the stored token; removing nothing is not an error
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the token cannot be removed.
    fn clear(&self) -> StorageResult<()>;
}

/// Token kept in a single file, readable only by the owner on Unix
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Uses `path` as the token file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> StorageResult<Option<SecretString>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token.to_string())))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, token: &SecretString) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);
        let mut file = options.open(&self.path)?;

        // mode() only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.expose_secret().as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token kept in memory only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<SecretString>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a token
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(SecretString::from(token.to_string()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> StorageResult<Option<SecretString>> {
        Ok(self.token.borrow().clone())
    }

    fn store(&self, token: &SecretString) -> StorageResult<()> {
        *self.token.borrow_mut() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// Login state of a session
pub struct AuthState {
    token: Option<SecretString>,
    store: Box<dyn TokenStore>,
}

impl AuthState {
    /// Reads the stored token; an unreadable store means logged out
    #[must_use]
    pub fn restore(store: Box<dyn TokenStore>) -> Self {
        let token = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read stored token");
            None
        });
        tracing::debug!(logged_in = token.is_some(), "Auth state restored");
        Self { token, store }
    }

    /// Returns true while a token is held
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Logs in and persists the token.
    ///
    /// Failures are reported through `notifier`; the previous token is kept.
    /// Returns true on success.
    pub async fn login(
        &mut self,
        api: &dyn SnippetApi,
        email: &str,
        password: &SecretString,
        notifier: &mut dyn Notifier,
    ) -> bool {
        match api.login(email, password).await {
            Ok(token) => {
                if let Err(e) = self.store.store(&token) {
                    tracing::warn!(error = %e, "Token not persisted, keeping it for this session");
                }
                self.token = Some(token);
                tracing::info!("Logged in");
                notifier.notify(Notification::success(messages::LOGIN_SUCCEEDED));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                notifier.notify(Notification::error(messages::LOGIN_FAILED));
                false
            }
        }
    }

    /// Forgets the token here and in durable storage
    pub fn logout(&mut self, notifier: &mut dyn Notifier) {
        self.token = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to remove stored token");
        }
        tracing::info!("Logged out");
        notifier.notify(Notification::info(messages::LOGGED_OUT));
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}
