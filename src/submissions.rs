//! Anonymous response collection: submit and owner-gated listing.
//!
//! The submit path is intentionally open (no identity required or
//! recorded); rate limiting is an external collaborator's job.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{FormsError, Result};
use crate::model::{FormId, FormResponse, UserId};
use crate::store::{FormStore, ResponseStore};
use crate::validate::check_submission;
use crate::view::{FormSummary, ResponsePage, SubmitReceipt};

/// Newest-first page served by `list`. `total_responses` in the page
/// counts only what the page holds, not the true total.
const RESPONSE_PAGE_SIZE: usize = 10;

/// Orchestrates response submission and retrieval.
pub struct ResponseService {
    forms: Arc<dyn FormStore>,
    responses: Arc<dyn ResponseStore>,
}

impl ResponseService {
    pub fn new(forms: Arc<dyn FormStore>, responses: Arc<dyn ResponseStore>) -> Self {
        Self { forms, responses }
    }

    /// Accept one anonymous submission against a published form.
    pub async fn submit(
        &self,
        form_id: &str,
        answers: Map<String, Value>,
        ip_address: Option<String>,
    ) -> Result<SubmitReceipt> {
        let id = FormId::parse(form_id)?;
        let form = self
            .forms
            .find_by_id(&id)
            .await?
            .ok_or_else(|| FormsError::not_found("Form not found"))?;

        check_submission(&form, &answers)?;

        let response = FormResponse::new(form.id, answers, ip_address);
        self.responses.save(&response).await?;

        info!(form_id = %form.id, response_id = %response.id, "response submitted");
        Ok(SubmitReceipt {
            message: "Response submitted successfully".into(),
            response_id: response.id,
        })
    }

    /// Most recent page of responses for an owned form.
    pub async fn list(&self, owner: &UserId, form_id: &str) -> Result<ResponsePage> {
        let id = FormId::parse(form_id)?;
        let form = self
            .forms
            .find_by_id(&id)
            .await?
            .ok_or_else(|| FormsError::not_found("Form not found"))?;
        if !form.is_owned_by(owner) {
            return Err(FormsError::forbidden(
                "You do not have permission to view responses for this form",
            ));
        }

        let page = self
            .responses
            .latest_for_form(&form.id, RESPONSE_PAGE_SIZE)
            .await?;
        debug!(form_id = %form.id, page_len = page.len(), "responses listed");

        Ok(ResponsePage {
            message: "Responses retrieved successfully".into(),
            form: FormSummary {
                id: form.id,
                title: form.title.clone(),
            },
            total_responses: page.len(),
            responses: page.iter().map(Into::into).collect(),
        })
    }
}
