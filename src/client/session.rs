/**
 * Session Token Persistence
 *
 * The client keeps its session token in a `TokenStore`:
 *
 * - `FileTokenStore` - a file under the user data directory (survives
 *   restarts, the counterpart of browser local storage)
 * - `MemoryTokenStore` - process memory, shared between clones (tests)
 *
 * Tokens are checked for expiry locally by reading the `exp` claim from the
 * token payload. The signature is not checked here; only the server can do
 * that.
 */

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::client::error::ClientError;

/// Persistent storage for the session token
pub trait TokenStore: Send + Sync {
    /// Stored token, if any
    fn load(&self) -> Result<Option<String>, ClientError>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token kept in memory
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned slot still holds a usable Option
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Token kept in a file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/pulsechat/token`
    ///
    /// Falls back to the temp directory when the platform has no data dir.
    pub fn default_location() -> Result<Self, ClientError> {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("pulsechat");
        std::fs::create_dir_all(&path)?;
        path.push("token");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Expiry (`exp`, seconds since the Unix epoch) read from a token payload
///
/// Returns `None` if the token is not a three-part JWT or its payload has
/// no numeric `exp`.
pub fn token_expiry(token: &str) -> Option<u64> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_u64()
}

/// Whether a token is expired at `now` (seconds since the Unix epoch)
///
/// A token whose expiry cannot be read counts as expired.
pub fn is_expired_at(token: &str, now: u64) -> bool {
    match token_expiry(token) {
        Some(exp) => exp <= now,
        None => true,
    }
}

/// Whether a token is expired now
pub fn is_expired(token: &str) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    is_expired_at(token, now)
}
