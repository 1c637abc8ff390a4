//! Form lifecycle orchestration: create, read, update, delete,
//! publish, unpublish, list, and the anonymous public read.
//!
//! Every owner-gated operation loads the form, applies the ownership
//! guard, then acts. Concurrent writes to the same form are
//! last-write-wins at the store; there is no version check.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{FormsError, Result};
use crate::input::{FormDefinition, FormPatch};
use crate::model::{Form, FormId, UserId};
use crate::store::{FormStore, ResponseStore};
use crate::view::{DeleteReceipt, FormListPayload, FormPayload, PublicFormPayload};

/// Orchestrates the form lifecycle over the persistence ports.
pub struct FormService {
    forms: Arc<dyn FormStore>,
    responses: Arc<dyn ResponseStore>,
}

impl FormService {
    pub fn new(forms: Arc<dyn FormStore>, responses: Arc<dyn ResponseStore>) -> Self {
        Self { forms, responses }
    }

    /// Create a new form owned by `owner`. Always starts as a draft;
    /// `FormDefinition` cannot express a published state.
    pub async fn create(&self, owner: &UserId, definition: FormDefinition) -> Result<FormPayload> {
        definition.validate()?;

        let form = Form::new(
            owner.clone(),
            definition.title,
            definition.description.unwrap_or_default(),
            definition.fields,
            definition.color_theme.unwrap_or_default(),
        );
        self.forms.save(&form).await?;

        info!(form_id = %form.id, owner = %owner, "form created");
        Ok(FormPayload::new("Form created successfully", &form))
    }

    /// All forms owned by `owner`. No pagination.
    pub async fn list(&self, owner: &UserId) -> Result<FormListPayload> {
        let forms = self.forms.find_by_owner(owner).await?;
        debug!(owner = %owner, count = forms.len(), "forms listed");
        Ok(FormListPayload {
            message: "Forms retrieved successfully".into(),
            forms: forms.iter().map(Into::into).collect(),
        })
    }

    /// Owner-facing read of a single form.
    pub async fn get(&self, owner: &UserId, form_id: &str) -> Result<FormPayload> {
        let form = self.load_owned(owner, form_id, "access this form").await?;
        Ok(FormPayload::new("Form retrieved successfully", &form))
    }

    /// Merge a patch onto an existing form. Only title, description,
    /// fields and color theme are patchable; owner, lifecycle state and
    /// creation metadata never change here. Nothing is saved if the
    /// patch fails validation.
    pub async fn update(
        &self,
        owner: &UserId,
        form_id: &str,
        patch: FormPatch,
    ) -> Result<FormPayload> {
        let mut form = self.load_owned(owner, form_id, "update this form").await?;
        patch.validate()?;

        if let Some(title) = patch.title {
            form.title = title;
        }
        if let Some(description) = patch.description {
            form.description = description;
        }
        if let Some(fields) = patch.fields {
            form.fields = fields;
        }
        if let Some(theme) = patch.color_theme {
            form.color_theme = theme;
        }
        form.touch();
        self.forms.save(&form).await?;

        info!(form_id = %form.id, "form updated");
        Ok(FormPayload::new("Form updated successfully", &form))
    }

    /// Delete a form and sweep its responses.
    ///
    /// The two steps are not transactional; both are idempotent so the
    /// whole operation can be re-run after a partial failure. Deleting
    /// an already-gone form is a no-op success, and the response sweep
    /// still runs to clear any orphans left by an earlier crash.
    pub async fn delete(&self, owner: &UserId, form_id: &str) -> Result<DeleteReceipt> {
        let id = FormId::parse(form_id)?;

        if let Some(form) = self.forms.find_by_id(&id).await? {
            if !form.is_owned_by(owner) {
                return Err(FormsError::forbidden(
                    "You do not have permission to delete this form",
                ));
            }
            self.forms.delete(&id).await?;
        }
        let swept = self.responses.delete_for_form(&id).await?;

        info!(form_id = %id, responses_swept = swept, "form deleted");
        Ok(DeleteReceipt {
            message: "Form deleted successfully".into(),
        })
    }

    /// Draft -> Published.
    pub async fn publish(&self, owner: &UserId, form_id: &str) -> Result<FormPayload> {
        let mut form = self.load_owned(owner, form_id, "publish this form").await?;
        form.publish()?;
        self.forms.save(&form).await?;

        info!(form_id = %form.id, "form published");
        Ok(FormPayload::new("Form published successfully", &form))
    }

    /// Published -> Draft.
    pub async fn unpublish(&self, owner: &UserId, form_id: &str) -> Result<FormPayload> {
        let mut form = self.load_owned(owner, form_id, "unpublish this form").await?;
        form.unpublish()?;
        self.forms.save(&form).await?;

        info!(form_id = %form.id, "form unpublished");
        Ok(FormPayload::new("Form unpublished successfully", &form))
    }

    /// Anonymous read of a published form.
    ///
    /// A draft form and a nonexistent one are indistinguishable here, so
    /// unauthenticated callers cannot probe for unpublished forms.
    pub async fn get_public(&self, form_id: &str) -> Result<PublicFormPayload> {
        let form = self.load(form_id).await.map_err(|err| match err {
            FormsError::NotFound(_) => {
                FormsError::not_found("Form not found or not published")
            }
            other => other,
        })?;

        if !form.is_published() {
            return Err(FormsError::not_found("Form not found or not published"));
        }

        Ok(PublicFormPayload {
            message: "Form retrieved successfully".into(),
            form: (&form).into(),
        })
    }

    pub(crate) async fn load(&self, form_id: &str) -> Result<Form> {
        let id = FormId::parse(form_id)?;
        self.forms
            .find_by_id(&id)
            .await?
            .ok_or_else(|| FormsError::not_found("Form not found"))
    }

    pub(crate) async fn load_owned(
        &self,
        owner: &UserId,
        form_id: &str,
        action: &str,
    ) -> Result<Form> {
        let form = self.load(form_id).await?;
        if !form.is_owned_by(owner) {
            return Err(FormsError::forbidden(format!(
                "You do not have permission to {action}"
            )));
        }
        Ok(form)
    }
}
