//! Test backend for filling forms without user interaction.
//!
//! `TestFiller` walks a `FillSession` through the stepper with pre-defined
//! answers, exactly as a user would: enter the answer, press next, wait for
//! the transition. This is useful for testing forms end to end.
//!
//! # Example
//!
//! ```rust
//! use formstep::{FormDefinition, FormFiller, Question, TestFiller};
//!
//! let form = FormDefinition::new(
//!     "Contact",
//!     vec![
//!         Question::new(1, "short-text", "Name").required().with_order(1),
//!         Question::new(2, "email", "Email").with_order(2),
//!     ],
//! );
//!
//! let answers = TestFiller::new()
//!     .with_answer(1, "Ada")
//!     .with_answer(2, "ada@example.com")
//!     .fill(&form)
//!     .unwrap();
//!
//! assert_eq!(answers.len(), 2);
//! ```

use std::collections::HashMap;

use formstep_types::{AnswerValue, Answers, FormDefinition, QuestionId};

use crate::{Advance, FillSession, FormFiller, StepperConfig, Validator};

/// A test backend that answers each step from a script.
#[derive(Debug, Clone, Default)]
pub struct TestFiller {
    answers: HashMap<QuestionId, AnswerValue>,
    validator: Validator,
}

/// Error type for TestFiller.
#[derive(Debug, thiserror::Error)]
pub enum TestFillerError {
    #[error("Question {id} rejected its answer: {message}")]
    Rejected { id: QuestionId, message: String },

    #[error("Stepper stopped at step {index} without requesting submission")]
    Stalled { index: usize },
}

impl TestFiller {
    /// Create a new empty test filler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific validator instead of the permissive default.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Script the answer for a question.
    pub fn with_answer(mut self, id: impl Into<QuestionId>, value: impl Into<AnswerValue>) -> Self {
        self.answers.insert(id.into(), value.into());
        self
    }
}

impl FormFiller for TestFiller {
    type Error = TestFillerError;

    fn fill(&self, form: &FormDefinition) -> Result<Answers, Self::Error> {
        let mut session = FillSession::with_config(form, StepperConfig::immediate(), self.validator);

        // Each step either moves forward by one or ends the run, so the loop
        // is bounded by the number of questions.
        for _ in 0..form.len() {
            let Some(question) = session.current_question() else {
                break;
            };
            if let Some(value) = self.answers.get(&question.id) {
                session.set_answer(question.id.clone(), value.clone());
            }

            match session.advance() {
                Advance::Submit => return Ok(session.into_answers()),
                Advance::Moving { .. } => {
                    session.settle();
                }
                Advance::Rejected(message) => {
                    return Err(TestFillerError::Rejected {
                        id: question.id.clone(),
                        message,
                    });
                }
                Advance::Busy | Advance::Empty => break,
            }
        }

        Err(TestFillerError::Stalled {
            index: session.current_index(),
        })
    }
}
