//! # formstep
//!
//! Answer validation and one-question-at-a-time stepping for form builders.
//! Backend-agnostic.
//!
//! Three pieces cooperate, with data flowing one way:
//!
//! - [`registry`] maps a field type tag to its answer shape and format rule.
//! - [`validator`] decides whether an answer to a question is admissible and
//!   explains why not.
//! - [`stepper`] walks an ordered list of questions and only advances past a
//!   question whose answer validates.
//!
//! [`FillSession`] ties them together for a single form-filling run, and
//! [`check_submission`] validates a whole form at once before answers are
//! handed to storage.
//!
//! ## Usage
//!
//! ```rust
//! use formstep::{validate_answer, AnswerValue, Question, ValidationResult};
//!
//! let question = Question::new(1, "email", "Your email").required();
//!
//! assert_eq!(
//!     validate_answer(&question, Some(&AnswerValue::from("jc"))),
//!     ValidationResult::fail("Invalid email"),
//! );
//! assert!(validate_answer(&question, Some(&"jc@example.com".into())).valid);
//! ```
//!
//! ## Backends
//!
//! Backends are separate crates that implement [`FormFiller`]:
//! - `formstep-wizard-ratatui` - TUI wizard, one question per screen
//!
//! [`TestFiller`] is a scripted backend for tests.

// Re-export all types from formstep-types
pub use formstep_types::*;

pub mod registry;

pub mod validator;
pub use validator::{ShapePolicy, Validator, validate_answer};

pub mod stepper;
pub use stepper::{Advance, Direction, Retreat, Stepper, StepperConfig};

mod session;
pub use session::FillSession;

mod submission;
pub use submission::{StoredAnswer, SubmissionError, check_submission};

mod filler;
pub use filler::FormFiller;

// Test backend for filling forms without user interaction
mod test_filler;
pub use test_filler::{TestFiller, TestFillerError};
