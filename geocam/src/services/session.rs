//! Session service
//!
//! Local persistence for the signed-in user and their token. Nothing here
//! talks to a server; the auth screens decide when to write or clear.

use crate::config::{TOKEN_KEY, USER_KEY};
use crate::database::DenroUser;
use crate::error::{AppError, Result};
use crate::storage::LocalStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn LocalStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub async fn save_user(&self, user: &DenroUser) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &json).await?;

        tracing::info!("Saved local user: {}", user.username);
        Ok(())
    }

    pub async fn save_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token).await
    }

    /// The stored user, `None` when nobody is signed in
    pub async fn current_user(&self) -> Result<Option<DenroUser>> {
        match self.store.get(USER_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::decode(USER_KEY, e)),
            _ => Ok(None),
        }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    /// Forget the user and token on this device
    pub async fn sign_out_local(&self) -> Result<()> {
        self.store.remove(USER_KEY).await?;
        self.store.remove(TOKEN_KEY).await?;

        tracing::info!("Cleared local session");
        Ok(())
    }
}
