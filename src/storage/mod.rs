pub mod credentials;
pub mod memory;
pub mod sqlite;

pub use credentials::{CredentialSource, StoredCredentials};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::utils::PlayerResult;

/// Durable string key-value storage shared by every player session.
///
/// Keys never contend across sessions: each session only touches the keys
/// derived from its own content id.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    async fn get(&self, key: &str) -> PlayerResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> PlayerResult<()>;
    async fn remove(&self, key: &str) -> PlayerResult<()>;
}
