use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::identity::errors::UserStoreError;
use crate::domain::identity::models::StoredIdentity;
use crate::domain::identity::ports::IdentityRegistry;
use crate::domain::identity::ports::UserStore;

/// User store kept in process memory, keyed by email.
///
/// Used by tests and for running the service without a database.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    identities: RwLock<HashMap<String, StoredIdentity>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the identity registered under `identity.email`.
    pub fn insert(&self, identity: StoredIdentity) {
        let mut identities = self
            .identities
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        identities.insert(identity.email.clone(), identity);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<StoredIdentity, UserStoreError> {
        let identities = self
            .identities
            .read()
            .map_err(|e| UserStoreError::Database(e.to_string()))?;

        identities
            .get(email)
            .cloned()
            .ok_or_else(|| UserStoreError::NotFound(email.to_string()))
    }
}

#[async_trait]
impl IdentityRegistry for InMemoryUserStore {
    async fn create(&self, identity: StoredIdentity) -> Result<StoredIdentity, UserStoreError> {
        let mut identities = self
            .identities
            .write()
            .map_err(|e| UserStoreError::Database(e.to_string()))?;

        if identities.contains_key(&identity.email) {
            return Err(UserStoreError::EmailAlreadyExists(identity.email));
        }
        identities.insert(identity.email.clone(), identity.clone());
        Ok(identity)
    }
}
