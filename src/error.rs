//! Error taxonomy for the forms core.
//!
//! Every failure is local to a single operation and carries a
//! human-readable message naming the offending field or resource.
//! Nothing here is retried internally; retry policy belongs to the caller.

use thiserror::Error;

use crate::store::StoreError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FormsError>;

/// Typed failures surfaced by the lifecycle and response services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormsError {
    /// Malformed input: bad identifier, invalid form definition, or a
    /// missing required answer.
    #[error("{0}")]
    Validation(String),

    /// Form or response absent. Also returned (deliberately) for an
    /// unpublished form reached via the public path, so unauthenticated
    /// callers cannot probe for draft forms.
    #[error("{0}")]
    NotFound(String),

    /// Authenticated identity does not own the form.
    #[error("{0}")]
    Forbidden(String),

    /// Duplicate unique value. Reserved; no current operation emits it.
    #[error("{0}")]
    Conflict(String),

    /// Invalid lifecycle transition (publish when published, unpublish
    /// when draft).
    #[error("{0}")]
    StateConflict(String),

    /// Persistence layer failure.
    #[error("storage: {0}")]
    Storage(String),
}

impl FormsError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub(crate) fn state_conflict(msg: impl Into<String>) -> Self {
        Self::StateConflict(msg.into())
    }
}

impl From<StoreError> for FormsError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
