//! Capability interfaces of the two managed services the handlers depend on,
//! an object store and a publish/subscribe notification service,
//! together with their HTTP and in-memory implementations.

mod error;
pub mod http_notifier;
pub mod http_store;
pub mod memory;

pub use error::{NotifierError, NotifierResult, StoreError, StoreResult};
pub use http_notifier::HttpNotifier;
pub use http_store::HttpObjectStore;
pub use memory::{MemoryNotifier, MemoryObjectStore};

use std::sync::Arc;

use async_trait::async_trait;
use strum_macros::AsRefStr;

use crate::config::{BackendKind, NotifierConfig, StoreConfig};

/// Key addressed blob storage.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    /// Returns `Ok(None)` when no object is stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Overwrites whatever is stored under `key`.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> StoreResult<()>;
}

/// A single topic of a publish/subscribe notification service.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    async fn publish(&self, subject: &str, message: &str) -> NotifierResult<()>;

    async fn subscribe(&self, protocol: Protocol, endpoint: &str) -> NotifierResult<()>;
}

/// Delivery protocol of a topic subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum Protocol {
    #[strum(serialize = "email")]
    Email,
}

// ###################################
// ->   CONSTRUCTORS
// ###################################
pub fn object_store_from_config(config: &StoreConfig) -> StoreResult<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.backend {
        BackendKind::Http => Arc::new(HttpObjectStore::new(
            &config.endpoint,
            config.bucket.clone(),
            config.auth_token.clone(),
            config.timeout(),
        )?),
        BackendKind::Memory => Arc::new(MemoryObjectStore::default()),
    };
    Ok(store)
}

pub fn notifier_from_config(config: &NotifierConfig) -> NotifierResult<Arc<dyn Notifier>> {
    let notifier: Arc<dyn Notifier> = match config.backend {
        BackendKind::Http => Arc::new(HttpNotifier::new(
            &config.endpoint,
            config.topic.clone(),
            config.auth_token.clone(),
            config.timeout(),
        )?),
        BackendKind::Memory => Arc::new(MemoryNotifier::default()),
    };
    Ok(notifier)
}
