//! Field schema registry: maps a field type to its answer shape and the
//! format rule applied to a non-empty scalar value.
//!
//! Every function here is pure and safe to call from any thread.

use std::sync::LazyLock;

use formstep_types::{AnswerShape, FieldType, ValidationResult};
use regex::Regex;

/// Deliberately permissive: a single `@` with no whitespace around it and at
/// least one `.` in the domain part.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_URL: &str = "Invalid URL";
pub const REQUIRED: &str = "This field is required";

/// Check a value against the email rule.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Check a value against the URL rule (WHATWG URL parsing).
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// The format rule for a single scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Any value passes.
    Permissive,

    /// Must match the email rule.
    Email,

    /// Must parse as a URL.
    Url,

    /// Must be a non-empty string. Used for tags the registry does not know.
    NonEmpty,
}

impl FieldRule {
    /// Apply the rule to a value.
    pub fn check(self, value: &str) -> ValidationResult {
        match self {
            Self::Permissive => ValidationResult::ok(),
            Self::Email if !is_email(value) => ValidationResult::fail(INVALID_EMAIL),
            Self::Url if !is_url(value) => ValidationResult::fail(INVALID_URL),
            Self::NonEmpty if value.is_empty() => ValidationResult::fail(REQUIRED),
            _ => ValidationResult::ok(),
        }
    }
}

/// Get the format rule for a field type.
///
/// `phone` and `number` stay permissive here; the rendering layer's native
/// input types are the only format enforcement those get.
pub fn rule_for(field_type: &FieldType) -> FieldRule {
    match field_type {
        FieldType::Email => FieldRule::Email,
        FieldType::Url => FieldRule::Url,
        FieldType::Unknown(_) => FieldRule::NonEmpty,
        _ => FieldRule::Permissive,
    }
}

/// Get the answer shape a field type expects.
pub fn shape_of(field_type: &FieldType) -> AnswerShape {
    match field_type {
        FieldType::Checkbox
        | FieldType::MultiSelect
        | FieldType::PictureChoice
        | FieldType::Ranking
        | FieldType::DateRange
        | FieldType::Matrix => AnswerShape::List,
        FieldType::MultiInput => AnswerShape::Map,
        _ => AnswerShape::Scalar,
    }
}
