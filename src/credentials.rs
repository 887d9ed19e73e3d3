//! API token storage
//!
//! The bearer token issued at login is kept in the system keyring so that
//! later invocations stay signed in. Tests use [`MemoryTokenStore`].

use crate::config::AuthConfig;
use crate::error::Result;
use std::sync::Mutex;

/// Storage for the backend bearer token
pub trait TokenStore: Send + Sync {
    /// Return the stored token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<()>;

    /// Forget the stored token
    fn clear(&self) -> Result<()>;
}

/// Token store backed by the OS keyring
pub struct KeyringTokenStore {
    service: String,
    user: String,
}

impl KeyringTokenStore {
    /// Create a store for the given keyring service/user pair
    pub fn new(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    /// Create a store using the names from configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.keyring_service.clone(), config.keyring_user.clone())
    }

    fn entry(&self) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, &self.user)?)
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        tracing::debug!("Stored API token in keyring ({})", self.service);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                tracing::info!("Cleared stored API token");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }
}
