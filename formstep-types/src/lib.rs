//! Core types for the formstep crate.
//!
//! This crate provides the foundational types for describing and filling forms:
//! - `FormDefinition` - The top-level form structure
//! - `Question`, `FieldType` and `SubInput` - Individual questions and their types
//! - `AnswerValue` and `Answers` - Collected answers keyed by question id
//! - `ValidationResult` - The `{valid, error}` pair returned by every check

mod field_type;
pub use field_type::{AnswerShape, FieldType};

mod question;
pub use question::{Question, QuestionId, QuestionOptions, SubInput, SubInputType};

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, Answers};

mod validation_result;
pub use validation_result::ValidationResult;

mod form_definition;
pub use form_definition::FormDefinition;

mod error;
pub use error::FormError;
