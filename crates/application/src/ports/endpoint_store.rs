//! Endpoint store port
//!
//! The store owns the persisted [`Settings`] object. Adapters implement
//! [`EndpointStore::load`] and [`EndpointStore::mutate`]; every other
//! operation is expressed as one atomic mutation on top of them.

use async_trait::async_trait;
use bridge_domain::{EndpointRecord, Settings, TokenMap};

/// Errors that can occur during store operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No endpoint has the given id.
    #[error("Endpoint with ID \"{0}\" not found")]
    NotFound(String),

    /// A mutation refused the change; nothing was written.
    #[error("{}", .0.join(", "))]
    Rejected(Vec<String>),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A change applied to the settings inside one load/save cycle.
pub type SettingsMutation<'a> =
    Box<dyn FnOnce(&mut Settings) -> Result<(), StoreError> + Send + 'a>;

/// Repository trait for endpoint and token persistence.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    /// Returns a snapshot of the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read.
    async fn load(&self) -> Result<Settings, StoreError>;

    /// Applies `mutation` and persists the result.
    ///
    /// Nothing is written when the mutation fails.
    ///
    /// # Errors
    ///
    /// Returns the mutation's error or a persistence failure.
    async fn mutate(&self, mutation: SettingsMutation<'_>) -> Result<(), StoreError>;

    /// Lists all endpoints in order.
    async fn list(&self) -> Result<Vec<EndpointRecord>, StoreError> {
        Ok(self.load().await?.endpoints)
    }

    /// Gets an endpoint by id.
    async fn get(&self, id: &str) -> Result<Option<EndpointRecord>, StoreError> {
        Ok(self.load().await?.endpoint(id).cloned())
    }

    /// Appends one endpoint.
    async fn add(&self, endpoint: EndpointRecord) -> Result<(), StoreError> {
        self.mutate(Box::new(move |settings| {
            settings.endpoints.push(endpoint);
            Ok(())
        }))
        .await
    }

    /// Replaces the endpoint stored under `id`.
    async fn update(&self, id: &str, endpoint: EndpointRecord) -> Result<(), StoreError> {
        self.mutate(Box::new(move |settings| {
            let slot = settings
                .endpoints
                .iter_mut()
                .find(|existing| existing.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            *slot = endpoint;
            Ok(())
        }))
        .await
    }

    /// Removes the endpoint stored under `id`.
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.mutate(Box::new(move |settings| {
            let index = settings
                .endpoints
                .iter()
                .position(|existing| existing.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            settings.endpoints.remove(index);
            Ok(())
        }))
        .await
    }

    /// Appends several endpoints at once.
    async fn append_all(&self, endpoints: Vec<EndpointRecord>) -> Result<(), StoreError> {
        self.mutate(Box::new(move |settings| {
            settings.endpoints.extend(endpoints);
            Ok(())
        }))
        .await
    }

    /// Replaces the whole endpoint collection.
    async fn replace_all(&self, endpoints: Vec<EndpointRecord>) -> Result<(), StoreError> {
        self.mutate(Box::new(move |settings| {
            settings.endpoints = endpoints;
            Ok(())
        }))
        .await
    }

    /// Returns the stored tokens.
    async fn tokens(&self) -> Result<TokenMap, StoreError> {
        Ok(self.load().await?.tokens)
    }

    /// Replaces the stored tokens.
    async fn set_tokens(&self, tokens: TokenMap) -> Result<(), StoreError> {
        self.mutate(Box::new(move |settings| {
            settings.tokens = tokens;
            Ok(())
        }))
        .await
    }
}
