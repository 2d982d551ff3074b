//! Whole-form check run at submission time.
//!
//! Unlike the stepper, which stops at the first failing step, this reports
//! every failing question so a form view can highlight all of them at once.

use std::collections::BTreeMap;

use formstep_types::{Answers, FormDefinition, QuestionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::validator::Validator;

/// An answer flattened to the string stored for its question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnswer {
    pub question_id: QuestionId,
    pub value: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("{} question(s) failed validation", .errors.len())]
    Invalid { errors: BTreeMap<QuestionId, String> },

    #[error("Failed to encode answer for question {id}: {source}")]
    Encode {
        id: QuestionId,
        #[source]
        source: serde_json::Error,
    },
}

impl SubmissionError {
    /// The per-question messages, if this is a validation failure.
    pub fn errors(&self) -> Option<&BTreeMap<QuestionId, String>> {
        match self {
            Self::Invalid { errors } => Some(errors),
            Self::Encode { .. } => None,
        }
    }
}

/// Validate every question of a form and flatten the answers for storage.
///
/// Answers to ids outside the form are ignored. Questions without an answer
/// (or with an empty one) produce no stored entry.
pub fn check_submission(
    form: &FormDefinition,
    answers: &Answers,
    validator: &Validator,
) -> Result<Vec<StoredAnswer>, SubmissionError> {
    let mut errors = BTreeMap::new();

    for question in form.questions() {
        let result = validator.validate(question, answers.get(&question.id));
        if !result.valid {
            debug!(question = %question.id, error = %result.error, "submission check failed");
            errors.insert(question.id.clone(), result.error);
        }
    }

    if !errors.is_empty() {
        return Err(SubmissionError::Invalid { errors });
    }

    let mut stored = Vec::new();
    for question in form.questions() {
        let Some(value) = answers.get(&question.id).filter(|v| !v.is_empty()) else {
            continue;
        };
        let value = value
            .to_stored_string()
            .map_err(|source| SubmissionError::Encode {
                id: question.id.clone(),
                source,
            })?;
        stored.push(StoredAnswer {
            question_id: question.id.clone(),
            value,
        });
    }

    info!(form = %form.title, answers = stored.len(), "submission accepted");
    Ok(stored)
}
