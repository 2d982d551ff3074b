use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AnswerShape;

/// A single answer value collected while filling a form.
///
/// This is the value stored in `Answers` for each answered question. In JSON
/// it is a string, an array of strings, or an object of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A single string (text-like, date, single choice).
    Text(String),

    /// An ordered list of strings (multi choice, ranking).
    Choices(Vec<String>),

    /// Sub-input id to value (multi-input).
    Fields(BTreeMap<String, String>),
}

impl AnswerValue {
    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a list of choices.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(choices) => Some(choices),
            _ => None,
        }
    }

    /// Try to get this value as a sub-input mapping.
    pub fn as_fields(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Check if the value counts as "not answered".
    ///
    /// An empty string and an empty list are empty. A mapping is never empty
    /// at this level; multi-input answers are judged per sub-input.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Choices(choices) => choices.is_empty(),
            Self::Fields(_) => false,
        }
    }

    /// Get the shape of this value.
    pub fn shape(&self) -> AnswerShape {
        match self {
            Self::Text(_) => AnswerShape::Scalar,
            Self::Choices(_) => AnswerShape::List,
            Self::Fields(_) => AnswerShape::Map,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Choices(_) => "Choices",
            Self::Fields(_) => "Fields",
        }
    }

    /// Flatten the value into the single string handed to storage.
    ///
    /// Text is kept verbatim; lists and mappings become compact JSON.
    pub fn to_stored_string(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Text(s) => Ok(s.clone()),
            other => serde_json::to_string(other),
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(choices: Vec<String>) -> Self {
        Self::Choices(choices)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(choices: Vec<&str>) -> Self {
        Self::Choices(choices.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeMap<String, String>> for AnswerValue {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self::Fields(fields)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for AnswerValue {
    fn from(fields: [(&str, &str); N]) -> Self {
        Self::Fields(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
