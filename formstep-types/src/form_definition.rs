use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{FormError, Question};

/// The top-level structure containing all questions and metadata for a form.
///
/// Questions are kept sorted by `order`, which is the step sequence used when
/// the form is filled one question at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    questions: Vec<Question>,
}

impl FormDefinition {
    /// Create a new form definition, sorting the questions by order.
    pub fn new(title: impl Into<String>, mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|q| q.order);
        Self {
            title: title.into(),
            description: None,
            questions,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse a form definition from JSON and check its structure.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let mut form: Self = serde_json::from_str(json)?;
        form.questions.sort_by_key(|q| q.order);
        form.validate_structure()?;
        for question in &form.questions {
            if question.field_type.is_unknown() {
                warn!(
                    id = %question.id,
                    field_type = %question.field_type,
                    "unknown field type, answers only need to be non-empty"
                );
            }
        }
        Ok(form)
    }

    /// Read a form definition from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FormError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the uniqueness rules: question ids, question orders, and
    /// sub-input ids within each question.
    pub fn validate_structure(&self) -> Result<(), FormError> {
        let mut ids = HashSet::new();
        let mut orders = HashMap::new();

        for question in &self.questions {
            if !ids.insert(&question.id) {
                return Err(FormError::DuplicateQuestionId(question.id.clone()));
            }
            if let Some(first) = orders.insert(question.order, &question.id) {
                return Err(FormError::DuplicateOrder {
                    order: question.order,
                    first: first.clone(),
                    second: question.id.clone(),
                });
            }

            let mut sub_ids = HashSet::new();
            for sub_input in question.sub_inputs() {
                if !sub_ids.insert(sub_input.id.as_str()) {
                    return Err(FormError::DuplicateSubInputId {
                        question: question.id.clone(),
                        sub_input: sub_input.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Get the questions in step order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Check if the form has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
