//! A single form-filling run: owns the transient answers, the live error for
//! each question, and the stepper.

use std::collections::BTreeMap;
use std::time::Instant;

use formstep_types::{AnswerValue, Answers, FormDefinition, Question, QuestionId, ValidationResult};

use crate::stepper::{Advance, Direction, Retreat, Stepper, StepperConfig};
use crate::validator::Validator;

#[derive(Debug, Clone)]
pub struct FillSession<'f> {
    form: &'f FormDefinition,
    answers: Answers,
    errors: BTreeMap<QuestionId, String>,
    stepper: Stepper<'f>,
}

impl<'f> FillSession<'f> {
    pub fn new(form: &'f FormDefinition) -> Self {
        Self::with_config(form, StepperConfig::default(), Validator::default())
    }

    pub fn with_config(
        form: &'f FormDefinition,
        config: StepperConfig,
        validator: Validator,
    ) -> Self {
        Self {
            form,
            answers: Answers::new(),
            errors: BTreeMap::new(),
            stepper: Stepper::with_config(form.questions(), config, validator),
        }
    }

    pub fn form(&self) -> &'f FormDefinition {
        self.form
    }

    pub fn stepper(&self) -> &Stepper<'f> {
        &self.stepper
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&'f Question> {
        self.stepper.current_question()
    }

    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.current_question()
            .and_then(|question| self.answers.get(&question.id))
    }

    pub fn current_index(&self) -> usize {
        self.stepper.current_index()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.stepper.progress_fraction()
    }

    pub fn direction(&self) -> Direction {
        self.stepper.direction()
    }

    pub fn is_animating(&self) -> bool {
        self.stepper.is_animating()
    }

    /// The live error for a question, if its last edit or advance failed.
    pub fn error_for(&self, id: &QuestionId) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn current_error(&self) -> Option<&str> {
        self.current_question().and_then(|q| self.error_for(&q.id))
    }

    /// Store an edit and re-run live validation for that question.
    ///
    /// Ids that do not belong to the form are stored without validation.
    pub fn set_answer(
        &mut self,
        id: impl Into<QuestionId>,
        value: impl Into<AnswerValue>,
    ) -> ValidationResult {
        let id = id.into();
        let value = value.into();

        let result = match self.form.questions().iter().find(|q| q.id == id) {
            Some(question) => self.stepper.validator().validate(question, Some(&value)),
            None => ValidationResult::ok(),
        };
        self.record(&id, &result);
        self.answers.insert(id, value);
        result
    }

    /// Store an edit for the question currently shown.
    pub fn set_current_answer(&mut self, value: impl Into<AnswerValue>) -> Option<ValidationResult> {
        let id = self.current_question()?.id.clone();
        Some(self.set_answer(id, value))
    }

    fn record(&mut self, id: &QuestionId, result: &ValidationResult) {
        if result.valid {
            self.errors.remove(id);
        } else {
            self.errors.insert(id.clone(), result.error.clone());
        }
    }

    pub fn can_advance(&self) -> bool {
        self.stepper.can_advance(&self.answers)
    }

    /// Advance the stepper, recording the error on rejection.
    pub fn advance(&mut self) -> Advance {
        let outcome = self.stepper.advance(&self.answers);
        if let Advance::Rejected(error) = &outcome
            && let Some(question) = self.stepper.current_question()
        {
            self.errors.insert(question.id.clone(), error.clone());
        }
        outcome
    }

    pub fn retreat(&mut self) -> Retreat {
        self.stepper.retreat()
    }

    pub fn settle(&mut self) -> bool {
        self.stepper.settle()
    }

    pub fn settle_if_elapsed(&mut self, now: Instant) -> bool {
        self.stepper.settle_if_elapsed(now)
    }

    /// Hand the answers off to the submission pathway.
    pub fn into_answers(self) -> Answers {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use formstep_types::{SubInput, SubInputType};

    use super::*;

    fn form() -> FormDefinition {
        FormDefinition::new(
            "Signup",
            vec![
                Question::new(1, "email", "Email").required().with_order(1),
                Question::new(2, "multi-input", "Details")
                    .with_order(2)
                    .with_sub_inputs(vec![
                        SubInput::new("name", SubInputType::Text, "Full Name").required(),
                    ]),
            ],
        )
    }

    #[test]
    fn live_validation_tracks_errors() {
        let form = form();
        let mut session = FillSession::new(&form);

        let result = session.set_answer(1, "jc");
        assert_eq!(result.error, "Invalid email");
        assert_eq!(session.error_for(&QuestionId::Int(1)), Some("Invalid email"));

        session.set_answer(1, "jc@example.com");
        assert_eq!(session.error_for(&QuestionId::Int(1)), None);
    }

    #[test]
    fn rejected_advance_records_error() {
        let form = form();
        let mut session =
            FillSession::with_config(&form, StepperConfig::immediate(), Validator::default());

        assert_eq!(
            session.advance(),
            Advance::Rejected("This field is required".to_string())
        );
        assert_eq!(session.current_error(), Some("This field is required"));
    }

    #[test]
    fn walks_to_submit() {
        let form = form();
        let mut session =
            FillSession::with_config(&form, StepperConfig::immediate(), Validator::default());

        session.set_current_answer("a@b.co");
        assert!(session.can_advance());
        assert_eq!(session.advance(), Advance::Moving { from: 0, to: 1 });

        session.set_current_answer([("name", "Ada Lovelace")]);
        assert_eq!(session.advance(), Advance::Submit);

        let answers = session.into_answers();
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn unknown_ids_are_stored_without_validation() {
        let form = form();
        let mut session = FillSession::new(&form);
        assert!(session.set_answer("utm_source", "").valid);
        assert!(session.answers().contains(&QuestionId::from("utm_source")));
    }
}
