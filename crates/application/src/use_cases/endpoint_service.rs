//! Endpoint service
//!
//! The boundary used by the host: validation in front of the store, and
//! the store in front of the executor. Every operation returns a
//! structured result; nothing panics across this boundary.

use std::collections::HashSet;
use std::sync::Arc;

use bridge_domain::{
    EndpointRecord, ExecutionResult, TokenMap, validate, validate_endpoint_id,
};
use serde_json::Value;

use crate::error::{EndpointError, EndpointResult};
use crate::executor::EndpointExecutor;
use crate::ports::{EndpointStore, StoreError};

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of endpoints persisted.
    pub imported: usize,
    /// One message per rejected candidate, plus any storage failure.
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Returns whether every candidate was imported.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Endpoint management and execution.
#[derive(Clone)]
pub struct EndpointService {
    store: Arc<dyn EndpointStore>,
    executor: EndpointExecutor,
}

impl EndpointService {
    /// Creates a service over `store` and `executor`.
    #[must_use]
    pub fn new(store: Arc<dyn EndpointStore>, executor: EndpointExecutor) -> Self {
        Self { store, executor }
    }

    /// Lists all endpoints in store order.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Storage`] when the store cannot be read.
    pub async fn list_endpoints(&self) -> EndpointResult<Vec<EndpointRecord>> {
        Ok(self.store.list().await?)
    }

    /// Gets one endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::NotFound`] for an unknown id.
    pub async fn get_endpoint(&self, id: &str) -> EndpointResult<EndpointRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| EndpointError::NotFound(id.to_string()))
    }

    /// Validates and stores a new endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Validation`] when the record is invalid or
    /// its id is already taken.
    pub async fn create_endpoint(&self, endpoint: EndpointRecord) -> EndpointResult<()> {
        let mut errors = validate(&endpoint).errors;
        let id = endpoint.id.clone();
        self.store
            .mutate(Box::new(move |settings| {
                merge_errors(
                    &mut errors,
                    validate_endpoint_id(&endpoint.id, &settings.endpoints).errors,
                );
                if !errors.is_empty() {
                    return Err(StoreError::Rejected(errors));
                }
                settings.endpoints.push(endpoint);
                Ok(())
            }))
            .await?;
        tracing::info!(%id, "endpoint created");
        Ok(())
    }

    /// Validates and replaces the endpoint stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Validation`] for an invalid record or an id
    /// change that collides with another endpoint, and
    /// [`EndpointError::NotFound`] when `id` is unknown.
    pub async fn update_endpoint(&self, id: &str, endpoint: EndpointRecord) -> EndpointResult<()> {
        let mut errors = validate(&endpoint).errors;
        self.store
            .mutate(Box::new(move |settings| {
                let index = settings
                    .endpoints
                    .iter()
                    .position(|existing| existing.id == id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                if endpoint.id != id {
                    let others: Vec<_> = settings
                        .endpoints
                        .iter()
                        .filter(|existing| existing.id != id)
                        .cloned()
                        .collect();
                    merge_errors(&mut errors, validate_endpoint_id(&endpoint.id, &others).errors);
                }
                if !errors.is_empty() {
                    return Err(StoreError::Rejected(errors));
                }
                settings.endpoints[index] = endpoint;
                Ok(())
            }))
            .await?;
        tracing::info!(%id, "endpoint updated");
        Ok(())
    }

    /// Deletes the endpoint stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::NotFound`] when `id` is unknown.
    pub async fn delete_endpoint(&self, id: &str) -> EndpointResult<()> {
        self.store.delete(id).await?;
        tracing::info!(%id, "endpoint deleted");
        Ok(())
    }

    /// Validates and executes `endpoint` against the current settings.
    pub async fn execute_endpoint(&self, endpoint: &EndpointRecord) -> ExecutionResult {
        let validation = validate(endpoint);
        if !validation.is_valid() {
            tracing::warn!(id = %endpoint.id, errors = %validation.message(), "refusing to run invalid endpoint");
            return ExecutionResult::failed(validation.message());
        }

        match self.store.load().await {
            Ok(settings) => self.executor.execute(endpoint, &settings).await,
            Err(error) => ExecutionResult::failed(EndpointError::from(error).to_string()),
        }
    }

    /// Looks up and executes the endpoint stored under `id`.
    pub async fn execute_by_id(&self, id: &str) -> ExecutionResult {
        match self.get_endpoint(id).await {
            Ok(endpoint) => self.execute_endpoint(&endpoint).await,
            Err(error) => ExecutionResult::failed(error.to_string()),
        }
    }

    /// Imports every valid candidate in one atomic append.
    ///
    /// Ids must be unique against the store and against earlier candidates
    /// in the same batch. A storage failure is reported inside the
    /// [`ImportReport`] and nothing is imported.
    pub async fn import_endpoints(&self, candidates: Vec<EndpointRecord>) -> ImportReport {
        let mut report = ImportReport::default();
        let mut accepted = 0;

        let outcome = self
            .store
            .mutate(Box::new(|settings| {
                for candidate in candidates {
                    let errors = creation_errors(&candidate, &settings.endpoints);
                    if errors.is_empty() {
                        settings.endpoints.push(candidate);
                        accepted += 1;
                    } else {
                        report.errors.push(rejection(&candidate.name, &errors));
                    }
                }
                Ok(())
            }))
            .await;

        match outcome {
            Ok(()) => report.imported = accepted,
            Err(error) => report.errors.push(error.to_string()),
        }

        tracing::info!(
            imported = report.imported,
            rejected = report.errors.len(),
            "import finished"
        );
        report
    }

    /// Parses a JSON array of endpoints and imports it.
    ///
    /// Elements that do not deserialise are reported like validation
    /// failures.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Validation`] when the text is not JSON or not
    /// an array.
    pub async fn import_json(&self, text: &str) -> EndpointResult<ImportReport> {
        let value: Value = serde_json::from_str(text)
            .map_err(|_| EndpointError::Validation(vec!["Invalid JSON".to_string()]))?;
        let Value::Array(items) = value else {
            return Err(EndpointError::Validation(vec![
                "JSON is not an array".to_string(),
            ]));
        };

        let mut parse_errors = Vec::new();
        let mut candidates = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let label = item
                .get("name")
                .and_then(Value::as_str)
                .map_or_else(|| format!("#{}", index + 1), str::to_string);
            match serde_json::from_value::<EndpointRecord>(item) {
                Ok(candidate) => candidates.push(candidate),
                Err(error) => parse_errors.push(rejection(&label, &[error.to_string()])),
            }
        }

        let mut report = self.import_endpoints(candidates).await;
        parse_errors.append(&mut report.errors);
        report.errors = parse_errors;
        Ok(report)
    }

    /// Replaces the whole collection, or nothing if any candidate fails.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Validation`] listing every rejected
    /// candidate.
    pub async fn replace_endpoints(&self, candidates: Vec<EndpointRecord>) -> EndpointResult<()> {
        let mut errors = Vec::new();
        let mut seen: Vec<EndpointRecord> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let candidate_errors = creation_errors(candidate, &seen);
            if candidate_errors.is_empty() {
                seen.push(candidate.clone());
            } else {
                errors.push(rejection(&candidate.name, &candidate_errors));
            }
        }
        if !errors.is_empty() {
            return Err(EndpointError::Validation(errors));
        }

        let count = candidates.len();
        self.store.replace_all(candidates).await?;
        tracing::info!(count, "endpoints replaced");
        Ok(())
    }

    /// Returns every endpoint for export.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Storage`] when the store cannot be read.
    pub async fn export_endpoints(&self) -> EndpointResult<Vec<EndpointRecord>> {
        self.list_endpoints().await
    }

    /// Returns every endpoint as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Storage`] when the store cannot be read or
    /// the records cannot be serialised.
    pub async fn export_json(&self) -> EndpointResult<String> {
        let endpoints = self.export_endpoints().await?;
        let mut json = serde_json::to_string_pretty(&endpoints)
            .map_err(|e| EndpointError::Storage(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    /// Returns the stored tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Storage`] when the store cannot be read.
    pub async fn tokens(&self) -> EndpointResult<TokenMap> {
        Ok(self.store.tokens().await?)
    }

    /// Replaces all tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Storage`] when the store cannot be written.
    pub async fn update_tokens(&self, tokens: TokenMap) -> EndpointResult<()> {
        Ok(self.store.set_tokens(tokens).await?)
    }

    /// Stores one token.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Validation`] for a blank name and
    /// [`EndpointError::Storage`] when the store cannot be written.
    pub async fn set_token(&self, name: &str, value: &str) -> EndpointResult<()> {
        if name.trim().is_empty() {
            return Err(EndpointError::Validation(vec![
                "Token name is required".to_string(),
            ]));
        }
        let (name, value) = (name.to_string(), value.to_string());
        self.store
            .mutate(Box::new(move |settings| {
                settings.tokens.insert(name, value);
                Ok(())
            }))
            .await?;
        Ok(())
    }

    /// Removes one token, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Storage`] when the store cannot be written.
    pub async fn remove_token(&self, name: &str) -> EndpointResult<bool> {
        let mut removed = false;
        self.store
            .mutate(Box::new(|settings| {
                removed = settings.tokens.remove(name).is_some();
                Ok(())
            }))
            .await?;
        Ok(removed)
    }
}

/// Full validation plus id checks against `existing`.
fn creation_errors(endpoint: &EndpointRecord, existing: &[EndpointRecord]) -> Vec<String> {
    let mut errors = validate(endpoint).errors;
    merge_errors(&mut errors, validate_endpoint_id(&endpoint.id, existing).errors);
    errors
}

fn merge_errors(errors: &mut Vec<String>, more: Vec<String>) {
    let present: HashSet<String> = errors.iter().cloned().collect();
    errors.extend(more.into_iter().filter(|error| !present.contains(error)));
}

fn rejection(name: &str, errors: &[String]) -> String {
    format!("Endpoint \"{name}\": {}", errors.join(", "))
}
