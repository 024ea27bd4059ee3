use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use super::KeyValueStore;
use crate::constants::TOKEN_KEY;

/// Source of the locally held bearer token
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn token(&self) -> Option<String>;
}

/// Reads the token the login flow left in the key-value store
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    store: Arc<dyn KeyValueStore>,
}

impl StoredCredentials {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialSource for StoredCredentials {
    async fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!("Failed to read auth token: {}", e);
                None
            }
        }
    }
}
