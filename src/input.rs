//! Pre-core validated inputs for form create and update.
//!
//! Transport-level shape checks (JSON types, enum membership) happen
//! before these structs exist; what remains here are the semantic rules
//! the core owns: minimum title length, non-empty labels, and field-id
//! uniqueness within a form. The services call `validate()` before
//! touching the store, so nothing is saved on a rejected input.
//!
//! `FormDefinition` has no published flag at all; a created form is a
//! draft by construction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FormsError;
use crate::model::{ColorTheme, FormField};

const MIN_TITLE_CHARS: usize = 3;

/// Input for `FormService::create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub color_theme: Option<ColorTheme>,
}

impl FormDefinition {
    pub fn validate(&self) -> Result<(), FormsError> {
        check_title(&self.title)?;
        check_fields(&self.fields)
    }
}

/// Input for `FormService::update`. Only these four properties are
/// patchable; owner, lifecycle state, and creation metadata are not
/// representable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FormField>>,
    #[serde(default)]
    pub color_theme: Option<ColorTheme>,
}

impl FormPatch {
    pub fn validate(&self) -> Result<(), FormsError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(fields) = &self.fields {
            check_fields(fields)?;
        }
        Ok(())
    }
}

fn check_title(title: &str) -> Result<(), FormsError> {
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(FormsError::validation(
            "Title must be at least 3 characters",
        ));
    }
    Ok(())
}

fn check_fields(fields: &[FormField]) -> Result<(), FormsError> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.label.is_empty() {
            return Err(FormsError::validation(format!(
                "Field \"{}\" must have a label",
                field.id
            )));
        }
        if !seen.insert(field.id.as_str()) {
            return Err(FormsError::validation(format!(
                "Duplicate field ID \"{}\"",
                field.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    fn field(id: &str, label: &str) -> FormField {
        FormField {
            id: id.into(),
            field_type: FieldType::Text,
            label: label.into(),
            placeholder: None,
            required: false,
            options: None,
            routing_rule: None,
            validation: None,
        }
    }

    #[test]
    fn short_title_rejected() {
        let def = FormDefinition {
            title: "Hi".into(),
            ..Default::default()
        };
        let err = def.validate().unwrap_err();
        assert_eq!(
            err,
            FormsError::Validation("Title must be at least 3 characters".into())
        );
    }

    #[test]
    fn duplicate_field_ids_rejected() {
        let def = FormDefinition {
            title: "Survey".into(),
            fields: vec![field("q1", "Name"), field("q1", "Email")],
            ..Default::default()
        };
        let err = def.validate().unwrap_err();
        assert_eq!(
            err,
            FormsError::Validation("Duplicate field ID \"q1\"".into())
        );
    }

    #[test]
    fn empty_label_rejected() {
        let def = FormDefinition {
            title: "Survey".into(),
            fields: vec![field("q1", "")],
            ..Default::default()
        };
        assert!(matches!(def.validate(), Err(FormsError::Validation(_))));
    }

    #[test]
    fn patch_checks_only_present_parts() {
        let patch = FormPatch::default();
        patch.validate().unwrap();

        let patch = FormPatch {
            title: Some("ok".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = FormPatch {
            fields: Some(vec![field("q1", "Name"), field("q2", "Email")]),
            ..Default::default()
        };
        patch.validate().unwrap();
    }
}
