//! Conversational stepper: presents one question at a time and only lets the
//! user move forward past a question whose answer validates.
//!
//! A step change is a two-phase transition. `advance`/`retreat` start it and
//! mark the stepper as animating; `settle` (or `settle_if_elapsed`) commits
//! the new index. While animating, every further request is answered with
//! `Busy`, which debounces key-repeat and double clicks.

use std::time::{Duration, Instant};

use formstep_types::{AnswerValue, Answers, Question};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validator::Validator;

/// Default transition window, matching the page animation.
pub const DEFAULT_TRANSITION_MS: u64 = 150;

/// Stepper configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    /// How long a transition stays in the animating state, in milliseconds.
    /// Zero commits every transition immediately.
    pub transition_ms: u64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

impl StepperConfig {
    pub fn immediate() -> Self {
        Self { transition_ms: 0 }
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Direction of the most recent transition, for presentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Outcome of an advance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// A transition to the next step has started.
    Moving { from: usize, to: usize },

    /// The last step validated; the caller should submit.
    Submit,

    /// The current answer failed validation. State is unchanged.
    Rejected(String),

    /// A transition is still in progress.
    Busy,

    /// There are no questions to advance through.
    Empty,
}

/// Outcome of a retreat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// A transition to the previous step has started.
    Moving { from: usize, to: usize },

    /// Already at the first step.
    AtStart,

    /// A transition is still in progress.
    Busy,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    to: usize,
    started: Instant,
}

/// Linear controller over an ordered list of questions.
#[derive(Debug, Clone)]
pub struct Stepper<'f> {
    questions: &'f [Question],
    index: usize,
    direction: Direction,
    pending: Option<Transition>,
    config: StepperConfig,
    validator: Validator,
}

impl<'f> Stepper<'f> {
    /// Create a stepper at the first question with default settings.
    pub fn new(questions: &'f [Question]) -> Self {
        Self::with_config(questions, StepperConfig::default(), Validator::default())
    }

    pub fn with_config(
        questions: &'f [Question],
        config: StepperConfig,
        validator: Validator,
    ) -> Self {
        Self {
            questions,
            index: 0,
            direction: Direction::Forward,
            pending: None,
            config,
            validator,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&'f Question> {
        self.questions.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Fraction of the form reached, counting the current step: `(i + 1) / n`.
    pub fn progress_fraction(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            (self.index + 1) as f64 / self.questions.len() as f64
        }
    }

    fn current_answer<'a>(&self, answers: &'a Answers) -> Option<&'a AnswerValue> {
        self.current_question().and_then(|q| answers.get(&q.id))
    }

    /// Exactly whether the current answer validates.
    pub fn can_advance(&self, answers: &Answers) -> bool {
        self.current_question()
            .is_some_and(|q| self.validator.validate(q, self.current_answer(answers)).valid)
    }

    /// Request a move to the next step, or submission from the last step.
    pub fn advance(&mut self, answers: &Answers) -> Advance {
        if self.is_animating() {
            return Advance::Busy;
        }
        let Some(question) = self.current_question() else {
            return Advance::Empty;
        };

        let result = self.validator.validate(question, self.current_answer(answers));
        if !result.valid {
            debug!(question = %question.id, error = %result.error, "advance rejected");
            return Advance::Rejected(result.error);
        }

        if self.is_last() {
            debug!(question = %question.id, "last step validated, ready to submit");
            return Advance::Submit;
        }

        let (from, to) = (self.index, self.index + 1);
        self.start(to, Direction::Forward);
        Advance::Moving { from, to }
    }

    /// Request a move to the previous step. Never validates the step being left.
    pub fn retreat(&mut self) -> Retreat {
        if self.is_animating() {
            return Retreat::Busy;
        }
        if self.index == 0 {
            return Retreat::AtStart;
        }

        let (from, to) = (self.index, self.index - 1);
        self.start(to, Direction::Backward);
        Retreat::Moving { from, to }
    }

    fn start(&mut self, to: usize, direction: Direction) {
        self.direction = direction;
        debug!(from = self.index, to, ?direction, "transition started");
        self.pending = Some(Transition {
            to,
            started: Instant::now(),
        });
        if self.config.transition_ms == 0 {
            self.settle();
        }
    }

    /// Commit a pending transition. Returns whether one was committed.
    pub fn settle(&mut self) -> bool {
        match self.pending.take() {
            Some(transition) => {
                self.index = transition.to;
                true
            }
            None => false,
        }
    }

    /// Commit a pending transition once its window has elapsed at `now`.
    pub fn settle_if_elapsed(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(transition)
                if now.saturating_duration_since(transition.started) >= self.config.transition() =>
            {
                self.settle()
            }
            _ => false,
        }
    }

    /// Time left until the pending transition may settle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|transition| {
            self.config
                .transition()
                .saturating_sub(now.saturating_duration_since(transition.started))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question::new(1, "short-text", "Name").required(),
            Question::new(2, "email", "Email"),
            Question::new(3, "radio", "Size")
                .required()
                .with_choices(["S", "M", "L"]),
        ]
    }

    #[test]
    fn starts_at_first_step() {
        let questions = questions();
        let stepper = Stepper::new(&questions);
        assert_eq!(stepper.current_index(), 0);
        assert!(stepper.is_first());
        assert!(!stepper.is_animating());
        assert!((stepper.progress_fraction() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejected_advance_keeps_state() {
        let questions = questions();
        let mut stepper = Stepper::new(&questions);
        let answers = Answers::new();

        assert!(!stepper.can_advance(&answers));
        assert_eq!(
            stepper.advance(&answers),
            Advance::Rejected("This field is required".to_string())
        );
        assert_eq!(stepper.current_index(), 0);
        assert!(!stepper.is_animating());
    }

    #[test]
    fn advance_is_two_phase_and_debounced() {
        let questions = questions();
        let mut stepper = Stepper::new(&questions);
        let answers = Answers::new().with(1, "Ada");

        assert!(stepper.can_advance(&answers));
        assert_eq!(stepper.advance(&answers), Advance::Moving { from: 0, to: 1 });
        assert!(stepper.is_animating());
        assert_eq!(stepper.current_index(), 0);

        assert_eq!(stepper.advance(&answers), Advance::Busy);
        assert_eq!(stepper.retreat(), Retreat::Busy);

        assert!(stepper.settle());
        assert_eq!(stepper.current_index(), 1);
        assert!(!stepper.is_animating());
        assert!(!stepper.settle());
    }

    #[test]
    fn settle_waits_for_transition_window() {
        let questions = questions();
        let mut stepper = Stepper::new(&questions);
        let answers = Answers::new().with(1, "Ada");

        stepper.advance(&answers);
        let started = Instant::now();
        assert!(stepper.remaining(started).is_some());
        assert!(!stepper.settle_if_elapsed(started));
        assert!(stepper.settle_if_elapsed(started + Duration::from_millis(200)));
        assert_eq!(stepper.current_index(), 1);
        assert_eq!(stepper.remaining(Instant::now()), None);
    }

    #[test]
    fn immediate_config_commits_at_once() {
        let questions = questions();
        let mut stepper =
            Stepper::with_config(&questions, StepperConfig::immediate(), Validator::default());
        let answers = Answers::new().with(1, "Ada");

        assert_eq!(stepper.advance(&answers), Advance::Moving { from: 0, to: 1 });
        assert_eq!(stepper.current_index(), 1);
        assert!(!stepper.is_animating());
    }

    #[test]
    fn last_step_requests_submit() {
        let questions = questions();
        let mut stepper =
            Stepper::with_config(&questions, StepperConfig::immediate(), Validator::default());
        let answers = Answers::new().with(1, "Ada").with(3, "M");

        stepper.advance(&answers);
        stepper.advance(&answers);
        assert!(stepper.is_last());
        assert_eq!(stepper.progress_fraction(), 1.0);

        assert_eq!(stepper.advance(&answers), Advance::Submit);
        assert_eq!(stepper.current_index(), 2);
    }

    #[test]
    fn retreat_never_validates() {
        let questions = questions();
        let mut stepper =
            Stepper::with_config(&questions, StepperConfig::immediate(), Validator::default());
        let mut answers = Answers::new().with(1, "Ada").with(2, "x@y.com");

        stepper.advance(&answers);
        stepper.advance(&answers);
        assert_eq!(stepper.current_index(), 2);

        answers.insert(2, "broken");
        assert_eq!(stepper.retreat(), Retreat::Moving { from: 2, to: 1 });
        assert_eq!(stepper.direction(), Direction::Backward);
        assert_eq!(stepper.retreat(), Retreat::Moving { from: 1, to: 0 });
        assert_eq!(stepper.retreat(), Retreat::AtStart);
        assert_eq!(stepper.current_index(), 0);
    }

    #[test]
    fn empty_form_cannot_advance() {
        let mut stepper = Stepper::new(&[]);
        assert!(!stepper.can_advance(&Answers::new()));
        assert_eq!(stepper.advance(&Answers::new()), Advance::Empty);
        assert_eq!(stepper.progress_fraction(), 0.0);
        assert_eq!(stepper.retreat(), Retreat::AtStart);
    }
}
