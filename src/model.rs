//! Form and response data model.
//!
//! Identifiers are value objects: UUID newtypes with a parsing
//! constructor that rejects malformed text, so a bad identifier is
//! distinguishable from an identifier that simply does not exist.
//!
//! `Form` carries its own lifecycle transitions (`publish`/`unpublish`)
//! and the ownership guard (`is_owned_by`). The `status`/`published_at`
//! pair moves only through those transitions, which keeps the invariant
//! "published exactly when `published_at` is set" local to this module.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::FormsError;

/// Form identifier (Value Object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(Uuid);

impl FormId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier supplied by a caller.
    ///
    /// Malformed text is a `Validation` failure, never `NotFound`.
    pub fn parse(raw: &str) -> Result<Self, FormsError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| FormsError::validation("Invalid form ID"))
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response identifier (Value Object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(Uuid);

impl ResponseId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, FormsError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| FormsError::validation("Invalid response ID"))
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verified caller identity, resolved by the auth collaborator.
///
/// This core never verifies credentials; it only compares identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, FormsError> {
        let id = id.into();
        if id.is_empty() {
            return Err(FormsError::validation("Invalid user ID"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a form. Only `Published` forms accept responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormStatus {
    #[default]
    Draft,
    Published,
}

/// Accent color applied when the form is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Purple,
    Blue,
    Green,
    Orange,
    Pink,
}

/// Input kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

/// Conditional-display rule linking one field's visibility to another
/// field's answer. Stored and returned verbatim; this core never
/// evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    pub source_question_id: String,
    pub condition: RoutingCondition,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoutingCondition {
    Equals,
    NotEquals,
    Contains,
}

/// Field-level constraints. Stored and returned verbatim; not enforced
/// when a response is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One question definition within a form.
///
/// `id` is caller-supplied, unique within its form, and is the key
/// responses use to reference this field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    /// Meaningful for select/radio/checkbox fields; not cross-validated
    /// against `field_type` here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_rule: Option<RoutingRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

/// Owner-authored form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub title: String,
    pub description: String,
    pub owner_id: UserId,
    /// Ordered: position is display/tab order.
    pub fields: Vec<FormField>,
    pub status: FormStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub color_theme: ColorTheme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Create a new draft form owned by `owner_id`.
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FormField>,
        color_theme: ColorTheme,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: FormId::generate(),
            title: title.into(),
            description: description.into(),
            owner_id,
            fields,
            status: FormStatus::Draft,
            published_at: None,
            color_theme,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ownership guard: exact identity equality.
    pub fn is_owned_by(&self, identity: &UserId) -> bool {
        &self.owner_id == identity
    }

    pub fn is_published(&self) -> bool {
        self.status == FormStatus::Published
    }

    /// Draft -> Published. Stamps `published_at`.
    pub fn publish(&mut self) -> Result<(), FormsError> {
        if self.is_published() {
            return Err(FormsError::state_conflict("Form is already published"));
        }
        self.status = FormStatus::Published;
        self.published_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    /// Published -> Draft. Clears `published_at`.
    pub fn unpublish(&mut self) -> Result<(), FormsError> {
        if !self.is_published() {
            return Err(FormsError::state_conflict("Form is not published"));
        }
        self.status = FormStatus::Draft;
        self.published_at = None;
        self.touch();
        Ok(())
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One anonymous submission against a form.
///
/// `form_id` is a lookup key, not an ownership relation; responses have
/// no owning identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub id: ResponseId,
    pub form_id: FormId,
    /// Field id -> submitted value, stored as given.
    pub responses: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
    /// Captured opportunistically, never validated.
    pub ip_address: Option<String>,
}

impl FormResponse {
    pub fn new(form_id: FormId, responses: Map<String, Value>, ip_address: Option<String>) -> Self {
        Self {
            id: ResponseId::generate(),
            form_id,
            responses,
            submitted_at: Utc::now(),
            ip_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn draft() -> Form {
        Form::new(owner(), "Contact us", "", vec![], ColorTheme::default())
    }

    #[test]
    fn malformed_id_is_validation_not_not_found() {
        let err = FormId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err, FormsError::Validation("Invalid form ID".into()));
    }

    #[test]
    fn id_round_trips_through_display() {
        let id = FormId::generate();
        assert_eq!(FormId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn empty_user_id_rejected() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn new_form_is_draft_with_defaults() {
        let form = draft();
        assert_eq!(form.status, FormStatus::Draft);
        assert!(form.published_at.is_none());
        assert_eq!(form.color_theme, ColorTheme::Purple);
        assert_eq!(form.created_at, form.updated_at);
    }

    #[test]
    fn publish_unpublish_keep_timestamp_invariant() {
        let mut form = draft();

        form.publish().unwrap();
        assert!(form.is_published());
        assert!(form.published_at.is_some());

        form.unpublish().unwrap();
        assert!(!form.is_published());
        assert!(form.published_at.is_none());
    }

    #[test]
    fn double_publish_is_state_conflict_and_changes_nothing() {
        let mut form = draft();
        form.publish().unwrap();
        let stamped = form.published_at;

        let err = form.publish().unwrap_err();
        assert_eq!(
            err,
            FormsError::StateConflict("Form is already published".into())
        );
        assert_eq!(form.published_at, stamped);
        assert!(form.is_published());
    }

    #[test]
    fn unpublish_draft_is_state_conflict() {
        let mut form = draft();
        let err = form.unpublish().unwrap_err();
        assert_eq!(err, FormsError::StateConflict("Form is not published".into()));
        assert!(form.published_at.is_none());
    }

    #[test]
    fn ownership_is_exact_equality() {
        let form = draft();
        assert!(form.is_owned_by(&owner()));
        assert!(!form.is_owned_by(&UserId::new("user-2").unwrap()));
    }

    #[test]
    fn routing_rule_round_trips_verbatim() {
        let rule = RoutingRule {
            source_question_id: "q1".into(),
            condition: RoutingCondition::NotEquals,
            value: "yes".into(),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["sourceQuestionId"], "q1");
        assert_eq!(json["condition"], "notEquals");
        let back: RoutingRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn field_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(FieldType::Textarea).unwrap(),
            serde_json::json!("textarea")
        );
        assert_eq!(
            serde_json::to_value(ColorTheme::Orange).unwrap(),
            serde_json::json!("orange")
        );
    }
}
