use std::path::PathBuf;

use crate::QuestionId;

/// Error type for loading and checking form definitions.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Failed to read form definition from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid form definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate question id: {0}")]
    DuplicateQuestionId(QuestionId),

    #[error("Questions {first} and {second} share order {order}")]
    DuplicateOrder {
        order: i64,
        first: QuestionId,
        second: QuestionId,
    },

    #[error("Question {question} has duplicate sub-input id '{sub_input}'")]
    DuplicateSubInputId {
        question: QuestionId,
        sub_input: String,
    },
}
