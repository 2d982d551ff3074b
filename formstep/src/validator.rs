//! Answer validation: decides whether an answer to a question may be kept,
//! advanced past, or submitted.

use std::collections::BTreeMap;

use formstep_types::{AnswerValue, FieldType, Question, SubInput, SubInputType, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::registry::{self, REQUIRED};

pub const UNEXPECTED_SHAPE: &str = "Unexpected answer shape";

/// How to treat an answer whose shape does not match its question type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapePolicy {
    /// Degrade to the most permissive reading: a wrong-shaped multi-input
    /// answer is an empty mapping, other mismatches skip format rules.
    #[default]
    Permissive,

    /// Reject non-empty answers of the wrong shape outright.
    Strict,
}

/// Validates answers against their questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: ShapePolicy,
}

impl Validator {
    pub fn new(policy: ShapePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ShapePolicy {
        self.policy
    }

    /// Validate an answer, or the absence of one, for a question.
    ///
    /// Never panics: every malformed input is turned into a result.
    pub fn validate(&self, question: &Question, answer: Option<&AnswerValue>) -> ValidationResult {
        if self.policy == ShapePolicy::Strict
            && let Some(value) = answer
            && !value.is_empty()
            && value.shape() != registry::shape_of(&question.field_type)
        {
            return ValidationResult::fail(UNEXPECTED_SHAPE);
        }

        if question.field_type == FieldType::MultiInput {
            let empty = BTreeMap::new();
            let fields = answer.and_then(AnswerValue::as_fields).unwrap_or(&empty);
            return validate_sub_inputs(question.sub_inputs(), fields);
        }

        let value = match answer {
            Some(value) if !value.is_empty() => value,
            _ if question.required => return ValidationResult::fail(REQUIRED),
            _ => return ValidationResult::ok(),
        };

        match value {
            AnswerValue::Text(text) => registry::rule_for(&question.field_type).check(text),
            AnswerValue::Choices(_) | AnswerValue::Fields(_) => ValidationResult::ok(),
        }
    }
}

/// Validate an answer with the permissive shape policy.
pub fn validate_answer(question: &Question, answer: Option<&AnswerValue>) -> ValidationResult {
    Validator::default().validate(question, answer)
}

/// Sub-inputs are checked in declared order and the first failure wins.
fn validate_sub_inputs(
    sub_inputs: &[SubInput],
    fields: &BTreeMap<String, String>,
) -> ValidationResult {
    for sub_input in sub_inputs {
        let value = fields
            .get(&sub_input.id)
            .map(String::as_str)
            .filter(|v| !v.is_empty());

        let Some(value) = value else {
            if sub_input.required {
                return ValidationResult::fail(format!("{} is required", sub_input.label));
            }
            continue;
        };

        match sub_input.input_type {
            SubInputType::Email if !registry::is_email(value) => {
                return ValidationResult::fail(format!("Invalid email in {}", sub_input.label));
            }
            SubInputType::Url if !registry::is_url(value) => {
                return ValidationResult::fail(format!("Invalid URL in {}", sub_input.label));
            }
            _ => {}
        }
    }

    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> Question {
        Question::new(9, "multi-input", "Personal Details").with_sub_inputs(vec![
            SubInput::new("a", SubInputType::Text, "Full Name").required(),
            SubInput::new("b", SubInputType::Email, "Email").required(),
        ])
    }

    #[test]
    fn default_policy_is_permissive() {
        assert_eq!(Validator::default().policy(), ShapePolicy::Permissive);
        assert_eq!(Validator::new(ShapePolicy::Strict).policy(), ShapePolicy::Strict);
    }

    #[test]
    fn optional_empty_answers_are_valid_for_every_type() {
        for tag in ["short-text", "email", "url", "checkbox", "rating", "slider"] {
            let question = Question::new(1, tag, "Q");
            assert!(validate_answer(&question, None).valid, "{tag} absent");
            assert!(
                validate_answer(&question, Some(&AnswerValue::from(""))).valid,
                "{tag} empty string"
            );
            assert!(
                validate_answer(&question, Some(&AnswerValue::Choices(Vec::new()))).valid,
                "{tag} empty list"
            );
        }
    }

    #[test]
    fn required_scalar_missing() {
        let question = Question::new(1, "short-text", "Name").required();
        let expected = ValidationResult::fail("This field is required");
        assert_eq!(validate_answer(&question, None), expected);
        assert_eq!(validate_answer(&question, Some(&"".into())), expected);
    }

    #[test]
    fn required_email_with_bad_value_reports_format() {
        let question = Question::new(1, "email", "Email").required();
        assert_eq!(
            validate_answer(&question, Some(&"jc".into())),
            ValidationResult::fail("Invalid email")
        );
        assert_eq!(
            validate_answer(&question, Some(&"".into())),
            ValidationResult::fail("This field is required")
        );
        assert!(validate_answer(&question, Some(&"a@b.c".into())).valid);
    }

    #[test]
    fn optional_url_with_bad_value_is_invalid() {
        let question = Question::new(1, "url", "Website");
        assert_eq!(
            validate_answer(&question, Some(&"notavalidurl".into())),
            ValidationResult::fail("Invalid URL")
        );
        assert!(validate_answer(&question, Some(&"https://example.com".into())).valid);
    }

    #[test]
    fn phone_and_number_are_permissive() {
        let phone = Question::new(1, "phone", "Phone").required();
        let number = Question::new(2, "number", "Age").required();
        assert!(validate_answer(&phone, Some(&"call me maybe".into())).valid);
        assert!(validate_answer(&number, Some(&"forty".into())).valid);
    }

    #[test]
    fn required_checkbox_needs_a_selection() {
        let question = Question::new(1, "checkbox", "Colors")
            .required()
            .with_choices(["Red", "Green"]);
        assert_eq!(
            validate_answer(&question, Some(&AnswerValue::Choices(Vec::new()))),
            ValidationResult::fail("This field is required")
        );
        assert!(validate_answer(&question, Some(&vec!["Red"].into())).valid);
    }

    #[test]
    fn multi_input_invalid_email_names_label() {
        let answer = AnswerValue::from([("a", "John"), ("b", "not-an-email")]);
        assert_eq!(
            validate_answer(&details(), Some(&answer)),
            ValidationResult::fail("Invalid email in Email")
        );
    }

    #[test]
    fn multi_input_first_missing_required_wins() {
        let answer = AnswerValue::from([("a", ""), ("b", "x@y.com")]);
        assert_eq!(
            validate_answer(&details(), Some(&answer)),
            ValidationResult::fail("Full Name is required")
        );

        assert_eq!(
            validate_answer(&details(), None),
            ValidationResult::fail("Full Name is required")
        );
    }

    #[test]
    fn multi_input_optional_sub_input_is_still_format_checked() {
        let question = Question::new(1, "multi-input", "Links").with_sub_inputs(vec![
            SubInput::new("site", SubInputType::Url, "Website"),
            SubInput::new("mail", SubInputType::Email, "Email"),
        ]);

        assert!(validate_answer(&question, None).valid);
        assert_eq!(
            validate_answer(&question, Some(&[("site", "nope")].into())),
            ValidationResult::fail("Invalid URL in Website")
        );
        assert_eq!(
            validate_answer(&question, Some(&[("mail", "nope")].into())),
            ValidationResult::fail("Invalid email in Email")
        );
    }

    #[test]
    fn multi_input_required_flag_on_question_does_not_apply_to_sub_inputs() {
        let question = Question::new(1, "multi-input", "Optional parts")
            .required()
            .with_sub_inputs(vec![SubInput::new("a", SubInputType::Text, "Nickname")]);
        assert!(validate_answer(&question, None).valid);
    }

    #[test]
    fn permissive_policy_degrades_wrong_shapes() {
        let text_answer = AnswerValue::from("John");
        assert_eq!(
            validate_answer(&details(), Some(&text_answer)),
            ValidationResult::fail("Full Name is required")
        );

        let email = Question::new(1, "email", "Email").required();
        assert!(validate_answer(&email, Some(&vec!["not-an-email"].into())).valid);
    }

    #[test]
    fn strict_policy_rejects_wrong_shapes() {
        let validator = Validator::new(ShapePolicy::Strict);
        let email = Question::new(1, "email", "Email").required();

        assert_eq!(
            validator.validate(&email, Some(&vec!["x@y.com"].into())),
            ValidationResult::fail("Unexpected answer shape")
        );
        assert_eq!(
            validator.validate(&details(), Some(&"John".into())),
            ValidationResult::fail("Unexpected answer shape")
        );
        assert_eq!(
            validator.validate(&email, Some(&"".into())),
            ValidationResult::fail("This field is required")
        );
        assert!(validator.validate(&email, Some(&"x@y.com".into())).valid);
    }
}
