use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::FieldType;

/// Identifier of a question, unique within its form.
///
/// Builders hand out either integer or string ids. A string that is the
/// canonical text of an integer (e.g. `"12"`) is normalized to `Int`, so ids
/// read back from JSON object keys match the ids in the form definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum QuestionId {
    Int(i64),
    Str(String),
}

impl QuestionId {
    fn normalized(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Self::Int(n),
            _ => Self::Str(s),
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for QuestionId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::normalized(s)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::normalized(s.to_string())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self::Int(n),
            Raw::Str(s) => Self::normalized(s),
        })
    }
}

/// A single prompt in a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the form.
    pub id: QuestionId,

    /// The field type tag, determining rendering and validation.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// The prompt text shown to the user.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Position in the display and step sequence. Unique, not necessarily contiguous.
    #[serde(default)]
    pub order: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<QuestionOptions>,
}

impl Question {
    /// Create a new optional question with no options.
    pub fn new(id: impl Into<QuestionId>, field_type: impl Into<FieldType>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type: field_type.into(),
            title: title.into(),
            description: None,
            placeholder: None,
            required: false,
            order: 0,
            options: None,
        }
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the display order.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Set the description shown under the title.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set a flat list of choices.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(QuestionOptions::Choices(
            choices.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the sub-inputs of a multi-input question.
    pub fn with_sub_inputs(mut self, sub_inputs: Vec<SubInput>) -> Self {
        self.options = Some(QuestionOptions::SubInputs(sub_inputs));
        self
    }

    /// Get the configured choices, or an empty slice.
    pub fn choices(&self) -> &[String] {
        match &self.options {
            Some(QuestionOptions::Choices(choices)) => choices,
            _ => &[],
        }
    }

    /// Get the configured sub-inputs, or an empty slice.
    pub fn sub_inputs(&self) -> &[SubInput] {
        match &self.options {
            Some(QuestionOptions::SubInputs(sub_inputs)) => sub_inputs,
            _ => &[],
        }
    }
}

/// The options of a question: either choices or sub-inputs.
///
/// Accepts three encodings on input: a list of choice strings, a list of
/// sub-input objects, or an object `{ "items": [...], "subInputs": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawOptions")]
pub enum QuestionOptions {
    /// Ordered choice strings for single and multi select types.
    Choices(Vec<String>),

    /// Ordered sub-inputs for the multi-input type.
    SubInputs(Vec<SubInput>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptions {
    Choices(Vec<String>),
    SubInputs(Vec<SubInput>),
    Object {
        #[serde(default)]
        items: Option<Vec<String>>,
        #[serde(default, rename = "subInputs", alias = "sub_inputs")]
        sub_inputs: Option<Vec<SubInput>>,
    },
}

impl From<RawOptions> for QuestionOptions {
    fn from(raw: RawOptions) -> Self {
        match raw {
            RawOptions::Choices(choices) => Self::Choices(choices),
            RawOptions::SubInputs(sub_inputs) => Self::SubInputs(sub_inputs),
            RawOptions::Object {
                sub_inputs: Some(sub_inputs),
                ..
            } if !sub_inputs.is_empty() => Self::SubInputs(sub_inputs),
            RawOptions::Object { items, .. } => Self::Choices(items.unwrap_or_default()),
        }
    }
}

/// The input type of a sub-input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubInputType {
    #[default]
    Text,
    Email,
    Number,
    Phone,
    Url,
    Date,
    Time,
}

/// One of several related inputs grouped under a multi-input question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubInput {
    /// Identifier, unique within the parent question.
    pub id: String,

    #[serde(rename = "type", default)]
    pub input_type: SubInputType,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,
}

impl SubInput {
    /// Create a new optional sub-input.
    pub fn new(id: impl Into<String>, input_type: SubInputType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            input_type,
            label: label.into(),
            placeholder: None,
            required: false,
        }
    }

    /// Mark the sub-input as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}
