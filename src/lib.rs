//! FormForge - self-hosted form builder core.
//!
//! Form lifecycle and response-validation engine: an authenticated
//! owner defines a structured form, publishes it, and collects
//! anonymous responses against the published definition.
//!
//! ## What lives here
//! - Form and response data model with value-object identifiers
//! - Draft/Published state machine
//! - Ownership-gated lifecycle service (create/read/update/delete/
//!   publish/unpublish/list)
//! - Response validator and anonymous collection service
//! - Persistence ports with in-memory implementations
//!
//! ## What does not
//! HTTP routing, credential handling, rate limiting, and real database
//! drivers are external collaborators. Callers hand this crate a
//! verified identity and get back a typed result.

pub mod error;
pub mod input;
pub mod model;
pub mod service;
pub mod store;
pub mod submissions;
pub mod validate;
pub mod view;

pub use error::{FormsError, Result};
pub use input::{FormDefinition, FormPatch};
pub use model::{
    ColorTheme, FieldType, FieldValidation, Form, FormField, FormId, FormResponse, FormStatus,
    ResponseId, RoutingCondition, RoutingRule, UserId,
};
pub use service::FormService;
pub use store::{
    FormStore, InMemoryFormStore, InMemoryResponseStore, ResponseStore, StoreError, StoreResult,
};
pub use submissions::ResponseService;
pub use validate::check_submission;
pub use view::{
    DeleteReceipt, FormListPayload, FormPayload, FormSummary, FormView, PublicFormPayload,
    PublicFormView, ResponsePage, ResponseView, SubmitReceipt,
};
