//! Auth token access.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

/// Supplies the current session's auth token, if the user is logged in.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Option<SecretString>;
}

/// In-memory token holder for hosts that manage login themselves.
#[derive(Default)]
pub struct StaticTokenSource {
    token: RwLock<Option<SecretString>>,
}

impl StaticTokenSource {
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub async fn set(&self, token: SecretString) {
        *self.token.write().await = Some(token);
    }

    /// Forget the token (logout).
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Option<SecretString> {
        let guard = self.token.read().await;
        guard
            .as_ref()
            .filter(|t| !t.expose_secret().trim().is_empty())
            .cloned()
    }
}
