//! Persistence ports for forms and responses.
//!
//! The traits are the seam to whatever backing store the deployment
//! uses; a single `save` is assumed atomic per document, and no
//! cross-document transaction exists. Deletes are idempotent: removing
//! something already gone reports `false`/zero rather than failing, so
//! the form-delete + response-sweep pair in the lifecycle service can be
//! re-run safely after a partial failure.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::model::{Form, FormId, FormResponse, ResponseId, UserId};

/// Store result type.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence layer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Form persistence port.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Find form by ID.
    async fn find_by_id(&self, id: &FormId) -> StoreResult<Option<Form>>;

    /// All forms owned by `owner`, in stable store order.
    async fn find_by_owner(&self, owner: &UserId) -> StoreResult<Vec<Form>>;

    /// Save form (insert or replace). Last write wins.
    async fn save(&self, form: &Form) -> StoreResult<()>;

    /// Delete form. Returns whether a document was removed.
    async fn delete(&self, id: &FormId) -> StoreResult<bool>;
}

/// Response persistence port.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Persist one response.
    async fn save(&self, response: &FormResponse) -> StoreResult<()>;

    /// Up to `limit` responses for a form, newest first by
    /// `submitted_at`.
    async fn latest_for_form(&self, form_id: &FormId, limit: usize)
        -> StoreResult<Vec<FormResponse>>;

    /// Delete every response for a form. Returns the count removed;
    /// zero is not an error.
    async fn delete_for_form(&self, form_id: &FormId) -> StoreResult<u64>;
}

/// In-memory form store for tests and development.
#[derive(Default)]
pub struct InMemoryFormStore {
    forms: DashMap<FormId, Form>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn find_by_id(&self, id: &FormId) -> StoreResult<Option<Form>> {
        Ok(self.forms.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_owner(&self, owner: &UserId) -> StoreResult<Vec<Form>> {
        let mut forms: Vec<Form> = self
            .forms
            .iter()
            .filter(|entry| entry.is_owned_by(owner))
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; sort for a stable order.
        forms.sort_by_key(|form| form.created_at);
        Ok(forms)
    }

    async fn save(&self, form: &Form) -> StoreResult<()> {
        self.forms.insert(form.id, form.clone());
        Ok(())
    }

    async fn delete(&self, id: &FormId) -> StoreResult<bool> {
        Ok(self.forms.remove(id).is_some())
    }
}

/// In-memory response store for tests and development.
#[derive(Default)]
pub struct InMemoryResponseStore {
    responses: DashMap<ResponseId, FormResponse>,
}

impl InMemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseStore for InMemoryResponseStore {
    async fn save(&self, response: &FormResponse) -> StoreResult<()> {
        self.responses.insert(response.id, response.clone());
        Ok(())
    }

    async fn latest_for_form(
        &self,
        form_id: &FormId,
        limit: usize,
    ) -> StoreResult<Vec<FormResponse>> {
        let mut matching: Vec<FormResponse> = self
            .responses
            .iter()
            .filter(|entry| entry.form_id == *form_id)
            .map(|entry| entry.value().clone())
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        matching.truncate(limit);
        Ok(matching)
    }

    async fn delete_for_form(&self, form_id: &FormId) -> StoreResult<u64> {
        let ids: Vec<ResponseId> = self
            .responses
            .iter()
            .filter(|entry| entry.form_id == *form_id)
            .map(|entry| entry.id)
            .collect();
        let mut removed = 0;
        for id in ids {
            if self.responses.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
