//! Response validation against a form definition.
//!
//! The contract is intentionally narrow: a published form and a
//! non-empty value for every required field. Field-level constraints
//! (`validation`) and routing rules are stored on the form but not
//! interpreted here; responses are accepted as submitted.

use serde_json::{Map, Value};

use crate::error::FormsError;
use crate::model::Form;

/// Check a candidate answer map against `form`.
///
/// Fail-fast: the first required field (in field order) without a
/// usable answer determines the failure, named by its label. Extra keys
/// that match no field are accepted silently.
pub fn check_submission(form: &Form, answers: &Map<String, Value>) -> Result<(), FormsError> {
    if !form.is_published() {
        return Err(FormsError::validation("Form is not accepting responses"));
    }

    for field in form.fields.iter().filter(|f| f.required) {
        if !has_answer(answers.get(&field.id)) {
            return Err(FormsError::validation(format!(
                "Field \"{}\" is required",
                field.label
            )));
        }
    }

    Ok(())
}

/// Absent key, JSON null, and the empty string all count as missing.
/// Anything else (including `false` and `0`) is an answer.
fn has_answer(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorTheme, FieldType, Form, FormField, UserId};
    use serde_json::json;

    fn field(id: &str, label: &str, required: bool) -> FormField {
        FormField {
            id: id.into(),
            field_type: FieldType::Text,
            label: label.into(),
            placeholder: None,
            required,
            options: None,
            routing_rule: None,
            validation: None,
        }
    }

    fn published_form(fields: Vec<FormField>) -> Form {
        let mut form = Form::new(
            UserId::new("owner").unwrap(),
            "Feedback",
            "",
            fields,
            ColorTheme::default(),
        );
        form.publish().unwrap();
        form
    }

    fn answers(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn draft_form_rejects_any_payload() {
        let mut form = published_form(vec![]);
        form.unpublish().unwrap();

        let err = check_submission(&form, &answers(&[("q1", json!("x"))])).unwrap_err();
        assert_eq!(
            err,
            FormsError::Validation("Form is not accepting responses".into())
        );
    }

    #[test]
    fn missing_required_field_named_by_label() {
        let form = published_form(vec![field("q1", "Your name", true)]);
        let err = check_submission(&form, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            FormsError::Validation("Field \"Your name\" is required".into())
        );
    }

    #[test]
    fn first_missing_required_field_wins() {
        let form = published_form(vec![
            field("q1", "Name", true),
            field("q2", "Email", true),
        ]);
        let err = check_submission(&form, &answers(&[("q2", json!("a@b.c"))])).unwrap_err();
        assert_eq!(err, FormsError::Validation("Field \"Name\" is required".into()));
    }

    #[test]
    fn empty_string_and_null_count_as_missing() {
        let form = published_form(vec![field("q1", "Name", true)]);

        let err = check_submission(&form, &answers(&[("q1", json!(""))])).unwrap_err();
        assert!(matches!(err, FormsError::Validation(_)));

        let err = check_submission(&form, &answers(&[("q1", Value::Null)])).unwrap_err();
        assert!(matches!(err, FormsError::Validation(_)));
    }

    #[test]
    fn false_and_zero_are_answers() {
        let form = published_form(vec![
            field("q1", "Subscribed", true),
            field("q2", "Count", true),
        ]);
        check_submission(&form, &answers(&[("q1", json!(false)), ("q2", json!(0))])).unwrap();
    }

    #[test]
    fn optional_fields_and_extra_keys_accepted_silently() {
        let form = published_form(vec![
            field("q1", "Name", true),
            field("q2", "Nickname", false),
        ]);
        check_submission(
            &form,
            &answers(&[("q1", json!("Ada")), ("stray", json!("ignored"))]),
        )
        .unwrap();
    }
}
