//! Projections returned to callers.
//!
//! Owner-facing reads always carry the full formatted form. The public
//! projection exposes only what an anonymous respondent needs: no
//! owner, no timestamps, no publish metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{ColorTheme, Form, FormField, FormId, FormResponse, ResponseId};

/// Owner-facing formatted form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub id: FormId,
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub color_theme: ColorTheme,
}

impl From<&Form> for FormView {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            description: form.description.clone(),
            fields: form.fields.clone(),
            is_published: form.is_published(),
            published_at: form.published_at,
            created_at: form.created_at,
            updated_at: form.updated_at,
            color_theme: form.color_theme,
        }
    }
}

/// Reduced projection served to anonymous respondents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFormView {
    pub id: FormId,
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
    pub color_theme: ColorTheme,
}

impl From<&Form> for PublicFormView {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            description: form.description.clone(),
            fields: form.fields.clone(),
            color_theme: form.color_theme,
        }
    }
}

/// Minimal form summary attached to a response listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSummary {
    pub id: FormId,
    pub title: String,
}

/// One response as shown to the form owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
    pub id: ResponseId,
    pub responses: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
    pub ip_address: Option<String>,
}

impl From<&FormResponse> for ResponseView {
    fn from(response: &FormResponse) -> Self {
        Self {
            id: response.id,
            responses: response.responses.clone(),
            submitted_at: response.submitted_at,
            ip_address: response.ip_address.clone(),
        }
    }
}

/// Success payload carrying one form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormPayload {
    pub message: String,
    pub form: FormView,
}

impl FormPayload {
    pub(crate) fn new(message: &str, form: &Form) -> Self {
        Self {
            message: message.into(),
            form: form.into(),
        }
    }
}

/// Success payload for `list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormListPayload {
    pub message: String,
    pub forms: Vec<FormView>,
}

/// Success payload for `get_public`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicFormPayload {
    pub message: String,
    pub form: PublicFormView,
}

/// Confirmation for `delete`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteReceipt {
    pub message: String,
}

/// Confirmation for `submit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub message: String,
    pub response_id: ResponseId,
}

/// One page of responses for a form.
///
/// `total_responses` counts this page only, not the true total; the
/// fixed page size lives in the response service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePage {
    pub message: String,
    pub form: FormSummary,
    pub responses: Vec<ResponseView>,
    pub total_responses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    #[test]
    fn public_view_hides_owner_and_lifecycle_metadata() {
        let mut form = Form::new(
            UserId::new("owner").unwrap(),
            "Survey",
            "desc",
            vec![],
            ColorTheme::Blue,
        );
        form.publish().unwrap();

        let json = serde_json::to_value(PublicFormView::from(&form)).unwrap();
        let object = json.as_object().unwrap();
        for key in ["id", "title", "description", "fields", "colorTheme"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        for key in ["ownerId", "isPublished", "publishedAt", "createdAt", "updatedAt"] {
            assert!(!object.contains_key(key), "leaked {key}");
        }
        assert_eq!(object.len(), 5);
    }

    #[test]
    fn owner_view_reflects_publish_state() {
        let mut form = Form::new(
            UserId::new("owner").unwrap(),
            "Survey",
            "",
            vec![],
            ColorTheme::default(),
        );
        form.publish().unwrap();

        let view = FormView::from(&form);
        assert!(view.is_published);
        assert_eq!(view.published_at, form.published_at);
        assert_eq!(view.color_theme, ColorTheme::Purple);
    }
}
