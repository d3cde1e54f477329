//! In-process backends. Used for local runs without the managed services and in unit tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;

use super::{
    Notifier, NotifierError, NotifierResult, ObjectStore, Protocol, StoreError, StoreResult,
};

// ###################################
// ->   OBJECT STORE
// ###################################
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Clones share the same objects.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    failure: Option<String>,
}

impl MemoryObjectStore {
    /// A store that returns `StoreError::Unavailable` from every call.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.lock().ok().and_then(|objects| objects.get(key).cloned())
    }

    pub fn insert(&self, key: &str, body: Vec<u8>, content_type: &str) {
        if let Ok(mut objects) = self.lock() {
            objects.insert(
                key.to_string(),
                StoredObject {
                    body,
                    content_type: content_type.to_string(),
                },
            );
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, StoredObject>>> {
        if let Some(reason) = &self.failure {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        self.objects
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let objects = self.lock()?;
        Ok(objects.get(key).map(|obj| obj.body.clone()))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> StoreResult<()> {
        let mut objects = self.lock()?;
        objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}

// ###################################
// ->   NOTIFIER
// ###################################
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub protocol: Protocol,
    pub endpoint: String,
}

#[derive(Debug, Default)]
struct Recorded {
    publications: Vec<Publication>,
    subscriptions: Vec<SubscriptionRequest>,
}

/// Records every publication and subscription. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    recorded: Arc<Mutex<Recorded>>,
    failure: Option<String>,
}

impl MemoryNotifier {
    /// A notifier that returns `NotifierError::Unavailable` from every call.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn publications(&self) -> Vec<Publication> {
        self.recorded
            .lock()
            .map(|rec| rec.publications.clone())
            .unwrap_or_default()
    }

    pub fn subscriptions(&self) -> Vec<SubscriptionRequest> {
        self.recorded
            .lock()
            .map(|rec| rec.subscriptions.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> NotifierResult<MutexGuard<'_, Recorded>> {
        if let Some(reason) = &self.failure {
            return Err(NotifierError::Unavailable(reason.clone()));
        }
        self.recorded
            .lock()
            .map_err(|_| NotifierError::Unavailable("memory notifier lock poisoned".to_string()))
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn publish(&self, subject: &str, message: &str) -> NotifierResult<()> {
        self.lock()?.publications.push(Publication {
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    async fn subscribe(&self, protocol: Protocol, endpoint: &str) -> NotifierResult<()> {
        self.lock()?.subscriptions.push(SubscriptionRequest {
            protocol,
            endpoint: endpoint.to_string(),
        });
        Ok(())
    }
}
